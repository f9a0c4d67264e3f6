//! Customer entity.
//!
//! Customers make up the call list. Each one is dialled at most once per
//! call request; their calls reference them by ID.

use serde::{Deserialize, Serialize};

use super::PhoneNumber;
use crate::domain::foundation::{CustomerId, Timestamp, ValidationError};

/// Maximum length for a customer name.
pub const MAX_NAME_LENGTH: usize = 200;

/// A person on the survey call list.
///
/// # Invariants
///
/// - `name` is 1-200 characters after trimming
/// - `phone_number` is normalized (see [`PhoneNumber`])
/// - `email`, when present, has a local part and a dotted domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    phone_number: PhoneNumber,
    email: Option<String>,
    company: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Customer {
    /// Create a new customer.
    ///
    /// # Errors
    ///
    /// Returns the first failing field validation.
    pub fn new(
        name: &str,
        phone_number: PhoneNumber,
        email: Option<&str>,
        company: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        let email = normalize_optional(email).map(validate_email).transpose()?;
        let company = normalize_optional(company);

        let now = Timestamp::now();
        Ok(Self {
            id: CustomerId::new(),
            name,
            phone_number,
            email,
            company,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a customer from persistence (no validation).
    pub fn reconstitute(
        id: CustomerId,
        name: String,
        phone_number: PhoneNumber,
        email: Option<String>,
        company: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            phone_number,
            email,
            company,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// First word of the name, used as the greeting in the call.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LENGTH {
        return Err(ValidationError::out_of_range(
            "name",
            1,
            MAX_NAME_LENGTH as i64,
            len as i64,
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_email(email: String) -> Result<String, ValidationError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::invalid_format("email", "not an email address"));
    }
    Ok(email.to_lowercase())
}

fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
