//! Customer command and query handlers.

mod create_customer;
mod delete_customer;
mod get_customer;
mod import_customers;
mod list_customers;

pub use create_customer::{CreateCustomerCommand, CreateCustomerHandler};
pub use delete_customer::{DeleteCustomerCommand, DeleteCustomerHandler};
pub use get_customer::{CustomerDetail, GetCustomerHandler, GetCustomerQuery};
pub use import_customers::{
    CustomerRecord, ImportCustomersCommand, ImportCustomersHandler, ImportReport, ImportRowError,
};
pub use list_customers::{ListCustomersHandler, ListCustomersQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[cfg(test)]
pub(crate) use create_customer::tests::MockCustomerRepository;
