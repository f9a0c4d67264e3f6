//! HTTP DTOs (Data Transfer Objects) for customer endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::customer::{CreateCustomerCommand, CustomerDetail};
use crate::domain::customer::Customer;

use crate::adapters::http::calls::dto::CallResponse;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to add one customer to the call list.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    /// Accepts `phone_number` or `phone`.
    #[serde(alias = "phone")]
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl From<CreateCustomerRequest> for CreateCustomerCommand {
    fn from(req: CreateCustomerRequest) -> Self {
        Self {
            name: req.name,
            phone_number: req.phone_number,
            email: req.email,
            company: req.company,
        }
    }
}

/// Paging parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Customer> for CustomerResponse {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id().to_string(),
            name: customer.name().to_string(),
            phone_number: customer.phone_number().to_string(),
            email: customer.email().map(str::to_string),
            company: customer.company().map(str::to_string),
            created_at: customer.created_at().to_rfc3339(),
            updated_at: customer.updated_at().to_rfc3339(),
        }
    }
}

/// A customer with their call history, newest call first.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDetailResponse {
    #[serde(flatten)]
    pub customer: CustomerResponse,
    pub calls: Vec<CallResponse>,
}

impl From<CustomerDetail> for CustomerDetailResponse {
    fn from(detail: CustomerDetail) -> Self {
        Self {
            customer: CustomerResponse::from(&detail.customer),
            calls: detail.calls.iter().map(CallResponse::from).collect(),
        }
    }
}

/// A page of customers.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerListResponse {
    pub customers: Vec<CustomerResponse>,
    pub count: usize,
}

impl From<Vec<Customer>> for CustomerListResponse {
    fn from(customers: Vec<Customer>) -> Self {
        let customers: Vec<CustomerResponse> = customers.iter().map(CustomerResponse::from).collect();
        Self {
            count: customers.len(),
            customers,
        }
    }
}
