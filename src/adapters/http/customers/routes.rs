//! Route configuration for customer endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    create_customer, delete_customer, get_customer, import_customers, list_customers,
};
use crate::adapters::http::state::AppState;

/// Creates the customer router.
///
/// Routes:
/// - `GET /api/customers` - List customers (`limit`, `offset`)
/// - `POST /api/customers` - Create one customer
/// - `POST /api/customers/import` - Import a CSV body
/// - `GET /api/customers/:id` - Customer with their calls
/// - `DELETE /api/customers/:id` - Delete a customer
pub fn customer_router() -> Router<AppState> {
    Router::new()
        .route("/api/customers", get(list_customers).post(create_customer))
        .route("/api/customers/import", post(import_customers))
        .route(
            "/api/customers/:id",
            get(get_customer).delete(delete_customer),
        )
}
