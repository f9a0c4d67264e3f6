//! HTTP adapter for voice platform webhooks.
//!
//! The raw body is passed through untouched so the signature can be
//! checked against the exact bytes that were signed.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::webhook_router;
