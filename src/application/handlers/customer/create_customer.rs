//! CreateCustomerHandler - Command handler for adding one customer.

use std::sync::Arc;

use crate::domain::customer::{Customer, CustomerError, PhoneNumber};
use crate::ports::CustomerRepository;

/// Command to add a customer to the call list.
#[derive(Debug, Clone)]
pub struct CreateCustomerCommand {
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub company: Option<String>,
}

/// Handler for adding customers.
pub struct CreateCustomerHandler {
    repository: Arc<dyn CustomerRepository>,
}

impl CreateCustomerHandler {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateCustomerCommand) -> Result<Customer, CustomerError> {
        let phone = PhoneNumber::parse(&cmd.phone_number)?;
        let customer = Customer::new(
            &cmd.name,
            phone,
            cmd.email.as_deref(),
            cmd.company.as_deref(),
        )?;

        self.repository.save(&customer).await?;

        tracing::info!(customer_id = %customer.id(), "Customer created");
        Ok(customer)
    }
}
