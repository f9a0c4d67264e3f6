//! Call module - outbound survey calls and their lifecycle.

mod aggregate;
mod errors;

pub use aggregate::Call;
pub use errors::CallError;
