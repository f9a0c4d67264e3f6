//! HTTP adapter for survey reporting.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::report_router;
