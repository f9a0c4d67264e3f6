//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations, grouped
//! by the resource they serve.

pub mod call;
pub mod customer;
pub mod report;
