//! HTTP adapter - REST API over the application handlers.
//!
//! Each resource has its own `dto`, `handlers` and `routes` modules; the
//! routers share one [`AppState`] and are combined by [`build_router`].

pub mod calls;
pub mod customers;
pub mod error;
pub mod reports;
pub mod router;
pub mod state;
pub mod system;
pub mod webhooks;

pub use error::{ApiError, ErrorResponse};
pub use router::{build_router, REQUEST_ID_HEADER};
pub use state::AppState;
