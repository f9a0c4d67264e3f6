//! HTTP adapter for the customer list.
//!
//! - `GET /api/customers` - List customers
//! - `POST /api/customers` - Create one customer
//! - `POST /api/customers/import` - CSV ingestion
//! - `GET /api/customers/{id}` - Customer with their calls
//! - `DELETE /api/customers/{id}` - Delete a customer

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::customer_router;
