//! Customer repository port.
//!
//! Persists the call list. Phone numbers are unique; implementations
//! report a clash as `ErrorCode::DuplicatePhoneNumber` with the offending
//! number in the `phone_number` detail.

use crate::domain::customer::{Customer, PhoneNumber};
use crate::domain::foundation::{CustomerId, DomainError};
use async_trait::async_trait;

/// Repository port for Customer persistence.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Save a new customer.
    ///
    /// # Errors
    ///
    /// - `DuplicatePhoneNumber` if the phone number is already on the list
    /// - `DatabaseError` on persistence failure
    async fn save(&self, customer: &Customer) -> Result<(), DomainError>;

    /// Find a customer by ID.
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DomainError>;

    /// Find a customer by normalized phone number.
    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Option<Customer>, DomainError>;

    /// List customers ordered by creation time, oldest first.
    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<Customer>, DomainError>;

    /// IDs of every customer, oldest first.
    async fn list_ids(&self) -> Result<Vec<CustomerId>, DomainError>;

    /// Delete a customer and, by cascade, their calls.
    ///
    /// # Errors
    ///
    /// - `CustomerNotFound` if no customer has this ID
    async fn delete(&self, id: CustomerId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CustomerRepository) {}
    }
}
