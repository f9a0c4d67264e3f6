//! ListCustomersHandler - Query handler for paging through the call list.

use std::sync::Arc;

use crate::domain::customer::Customer;
use crate::domain::foundation::DomainError;
use crate::ports::CustomerRepository;

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Query for a page of customers.
#[derive(Debug, Clone, Default)]
pub struct ListCustomersQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Handler for listing customers.
pub struct ListCustomersHandler {
    repository: Arc<dyn CustomerRepository>,
}

impl ListCustomersHandler {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListCustomersQuery) -> Result<Vec<Customer>, DomainError> {
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        self.repository
            .list(limit, query.offset.unwrap_or(0))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::customer::create_customer::tests::MockCustomerRepository;
    use crate::domain::customer::PhoneNumber;

    fn customers(n: usize) -> Vec<Customer> {
        (0..n)
            .map(|i| {
                Customer::new(
                    &format!("Customer {}", i),
                    PhoneNumber::parse(&format!("+1415555{:04}", i)).unwrap(),
                    None,
                    None,
                )
                .unwrap()
            })
            .collect()
    }

    #[tokio::test]
    async fn pages_with_limit_and_offset() {
        let handler =
            ListCustomersHandler::new(Arc::new(MockCustomerRepository::with_customers(customers(5))));

        let page = handler
            .handle(ListCustomersQuery {
                limit: Some(2),
                offset: Some(3),
            })
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name(), "Customer 3");
    }

    #[tokio::test]
    async fn zero_limit_is_clamped_to_one() {
        let handler =
            ListCustomersHandler::new(Arc::new(MockCustomerRepository::with_customers(customers(3))));

        let page = handler
            .handle(ListCustomersQuery {
                limit: Some(0),
                offset: None,
            })
            .await
            .unwrap();

        assert_eq!(page.len(), 1);
    }
}
