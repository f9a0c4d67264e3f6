//! Customer-specific error types.

use crate::domain::foundation::{CustomerId, DomainError, ErrorCode, ValidationError};

/// Customer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerError {
    /// Customer was not found.
    NotFound(CustomerId),
    /// Another customer already uses this phone number.
    DuplicatePhoneNumber(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl CustomerError {
    pub fn not_found(id: CustomerId) -> Self {
        CustomerError::NotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CustomerError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        CustomerError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            CustomerError::NotFound(_) => ErrorCode::CustomerNotFound,
            CustomerError::DuplicatePhoneNumber(_) => ErrorCode::DuplicatePhoneNumber,
            CustomerError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CustomerError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            CustomerError::NotFound(id) => format!("Customer not found: {}", id),
            CustomerError::DuplicatePhoneNumber(phone) => {
                format!("A customer with phone number {} already exists", phone)
            }
            CustomerError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CustomerError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CustomerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CustomerError {}

impl From<ValidationError> for CustomerError {
    fn from(err: ValidationError) -> Self {
        CustomerError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for CustomerError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicatePhoneNumber => CustomerError::DuplicatePhoneNumber(
                err.details.get("phone_number").cloned().unwrap_or_default(),
            ),
            ErrorCode::ValidationFailed => CustomerError::validation(
                err.details.get("field").cloned().unwrap_or_default(),
                err.message,
            ),
            _ => CustomerError::infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_phone_maps_from_domain_error() {
        let err = DomainError::new(ErrorCode::DuplicatePhoneNumber, "duplicate")
            .with_detail("phone_number", "+14155550100");
        assert_eq!(
            CustomerError::from(err),
            CustomerError::DuplicatePhoneNumber("+14155550100".to_string())
        );
    }

    #[test]
    fn database_error_becomes_infrastructure() {
        let err = DomainError::database("Failed to insert customer", "boom");
        let mapped = CustomerError::from(err);
        assert_eq!(mapped.code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn validation_error_keeps_field() {
        let err = CustomerError::from(ValidationError::empty_field("name"));
        assert!(matches!(err, CustomerError::ValidationFailed { ref field, .. } if field == "name"));
    }
}
