//! HTTP adapter for outbound survey calls.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::call_router;
