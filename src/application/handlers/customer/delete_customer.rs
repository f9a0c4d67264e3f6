//! DeleteCustomerHandler - Command handler for removing a customer.

use std::sync::Arc;

use crate::domain::customer::CustomerError;
use crate::domain::foundation::{CustomerId, ErrorCode};
use crate::ports::CustomerRepository;

/// Command to delete a customer and their call history.
#[derive(Debug, Clone)]
pub struct DeleteCustomerCommand {
    pub customer_id: CustomerId,
}

/// Handler for deleting customers.
pub struct DeleteCustomerHandler {
    repository: Arc<dyn CustomerRepository>,
}

impl DeleteCustomerHandler {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteCustomerCommand) -> Result<(), CustomerError> {
        match self.repository.delete(cmd.customer_id).await {
            Ok(()) => {
                tracing::info!(customer_id = %cmd.customer_id, "Customer deleted");
                Ok(())
            }
            Err(e) if e.code == ErrorCode::CustomerNotFound => {
                Err(CustomerError::not_found(cmd.customer_id))
            }
            Err(e) => Err(e.into()),
        }
    }
}
