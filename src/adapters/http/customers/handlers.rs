//! HTTP handlers for customer endpoints.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::csv::read_customers;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::customer::{
    DeleteCustomerCommand, GetCustomerQuery, ListCustomersQuery,
};
use crate::domain::foundation::CustomerId;

use super::dto::{
    CreateCustomerRequest, CustomerDetailResponse, CustomerListResponse, CustomerResponse,
    PageParams,
};

/// GET /api/customers - One page of the call list
pub async fn list_customers(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let customers = state
        .list_customers_handler()
        .handle(ListCustomersQuery {
            limit: page.limit,
            offset: page.offset,
        })
        .await?;
    Ok(Json(CustomerListResponse::from(customers)))
}

/// POST /api/customers - Add one customer
pub async fn create_customer(
    State(state): State<AppState>,
    request: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = request?;
    let customer = state
        .create_customer_handler()
        .handle(request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(CustomerResponse::from(&customer))))
}

/// GET /api/customers/:id - A customer and their calls
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id = parse_customer_id(&id)?;
    let detail = state
        .get_customer_handler()
        .handle(GetCustomerQuery { customer_id })
        .await?;
    Ok(Json(CustomerDetailResponse::from(detail)))
}

/// DELETE /api/customers/:id - Remove a customer and their calls
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id = parse_customer_id(&id)?;
    state
        .delete_customer_handler()
        .handle(DeleteCustomerCommand { customer_id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/customers/import - Bulk insert from a CSV body
///
/// Row problems are reported in the body; only an unusable header fails
/// the request.
pub async fn import_customers(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let command = read_customers(body.as_ref())?;
    let report = state.import_customers_handler().handle(command).await?;
    Ok(Json(report))
}

pub(crate) fn parse_customer_id(raw: &str) -> Result<CustomerId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid customer id: {}", raw)))
}
