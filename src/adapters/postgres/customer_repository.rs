//! PostgreSQL implementation of CustomerRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::customer::{Customer, PhoneNumber};
use crate::domain::foundation::{CustomerId, DomainError, ErrorCode, Timestamp};
use crate::ports::CustomerRepository;

/// PostgreSQL implementation of the CustomerRepository port.
#[derive(Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx query mapping.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: uuid::Uuid,
    name: String,
    phone_number: String,
    email: Option<String>,
    company: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = DomainError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let phone_number = PhoneNumber::parse(&row.phone_number).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid stored phone number: {}", e),
            )
        })?;

        Ok(Customer::reconstitute(
            CustomerId::from_uuid(row.id),
            row.name,
            phone_number,
            row.email,
            row.company,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

const SELECT_CUSTOMER: &str = r#"
    SELECT id, name, phone_number, email, company, created_at, updated_at
    FROM customers
"#;

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn save(&self, customer: &Customer) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO customers (
                id, name, phone_number, email, company, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(customer.id().as_uuid())
        .bind(customer.name())
        .bind(customer.phone_number().as_str())
        .bind(customer.email())
        .bind(customer.company())
        .bind(customer.created_at().as_datetime())
        .bind(customer.updated_at().as_datetime())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::new(
                    ErrorCode::DuplicatePhoneNumber,
                    format!(
                        "A customer with phone number {} already exists",
                        customer.phone_number()
                    ),
                )
                .with_detail("phone_number", customer.phone_number().as_str()))
            }
            Err(e) => Err(DomainError::database("Failed to insert customer", e)),
        }
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_CUSTOMER))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to fetch customer", e))?;

        row.map(Customer::try_from).transpose()
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> =
            sqlx::query_as(&format!("{} WHERE phone_number = $1", SELECT_CUSTOMER))
                .bind(phone.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to fetch customer by phone", e))?;

        row.map(Customer::try_from).transpose()
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<Customer>, DomainError> {
        let rows: Vec<CustomerRow> = sqlx::query_as(&format!(
            "{} ORDER BY created_at, id LIMIT $1 OFFSET $2",
            SELECT_CUSTOMER
        ))
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list customers", e))?;

        rows.into_iter().map(Customer::try_from).collect()
    }

    async fn list_ids(&self) -> Result<Vec<CustomerId>, DomainError> {
        let ids: Vec<(uuid::Uuid,)> =
            sqlx::query_as("SELECT id FROM customers ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to list customer ids", e))?;

        Ok(ids.into_iter().map(|(id,)| CustomerId::from_uuid(id)).collect())
    }

    async fn delete(&self, id: CustomerId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete customer", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CustomerNotFound,
                format!("Customer not found: {}", id),
            ));
        }

        Ok(())
    }
}
