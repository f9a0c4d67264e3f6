//! In-memory adapters.
//!
//! A single store implementing every persistence port, for tests and for
//! running the service without PostgreSQL.

mod store;

pub use store::InMemorySurveyStore;
