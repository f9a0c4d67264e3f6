//! Service endpoints: health check and the survey script.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::system_router;
