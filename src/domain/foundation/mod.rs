//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the voice survey domain.

mod call_status;
mod errors;
mod ids;
mod timestamp;

pub use call_status::CallStatus;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CallId, ConversationId, CustomerId, ResponseId};
pub use timestamp::Timestamp;
