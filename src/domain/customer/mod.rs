//! Customer module - the survey call list.

mod aggregate;
mod errors;
mod phone;

pub use aggregate::{Customer, MAX_NAME_LENGTH};
pub use errors::CustomerError;
pub use phone::PhoneNumber;
