//! GetCustomerHandler - Query handler for a customer and their calls.

use std::sync::Arc;

use crate::domain::call::Call;
use crate::domain::customer::{Customer, CustomerError};
use crate::domain::foundation::CustomerId;
use crate::ports::{CallRepository, CustomerRepository};

/// Query for one customer.
#[derive(Debug, Clone)]
pub struct GetCustomerQuery {
    pub customer_id: CustomerId,
}

/// A customer with their call history, newest call first.
#[derive(Debug, Clone)]
pub struct CustomerDetail {
    pub customer: Customer,
    pub calls: Vec<Call>,
}

/// Handler for customer detail queries.
pub struct GetCustomerHandler {
    customers: Arc<dyn CustomerRepository>,
    calls: Arc<dyn CallRepository>,
}

impl GetCustomerHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>, calls: Arc<dyn CallRepository>) -> Self {
        Self { customers, calls }
    }

    pub async fn handle(&self, query: GetCustomerQuery) -> Result<CustomerDetail, CustomerError> {
        let customer = self
            .customers
            .find_by_id(query.customer_id)
            .await?
            .ok_or_else(|| CustomerError::not_found(query.customer_id))?;

        let calls = self.calls.list_by_customer(query.customer_id).await?;

        Ok(CustomerDetail { customer, calls })
    }
}
