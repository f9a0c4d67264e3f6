//! PostgreSQL implementation of CallRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::call::Call;
use crate::domain::foundation::{
    CallId, CallStatus, ConversationId, CustomerId, DomainError, ErrorCode, Timestamp,
};
use crate::ports::CallRepository;

/// PostgreSQL implementation of the CallRepository port.
#[derive(Clone)]
pub struct PostgresCallRepository {
    pool: PgPool,
}

impl PostgresCallRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx query mapping.
#[derive(Debug, sqlx::FromRow)]
struct CallRow {
    id: uuid::Uuid,
    customer_id: uuid::Uuid,
    conversation_id: Option<String>,
    call_sid: Option<String>,
    status: String,
    duration_secs: Option<i32>,
    summary: Option<String>,
    failure_reason: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl TryFrom<CallRow> for Call {
    type Error = DomainError;

    fn try_from(row: CallRow) -> Result<Self, Self::Error> {
        let status: CallStatus = row.status.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid call status: {}", e))
        })?;

        let conversation_id = row
            .conversation_id
            .map(ConversationId::new)
            .transpose()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid conversation_id: {}", e),
                )
            })?;

        Ok(Call::reconstitute(
            CallId::from_uuid(row.id),
            CustomerId::from_uuid(row.customer_id),
            conversation_id,
            row.call_sid,
            status,
            row.duration_secs.and_then(|d| u32::try_from(d).ok()),
            row.summary,
            row.failure_reason,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
            row.completed_at.map(Timestamp::from_datetime),
        ))
    }
}

/// Converts a duration for the INTEGER column.
fn duration_to_db(secs: Option<u32>) -> Option<i32> {
    secs.map(|s| i32::try_from(s).unwrap_or(i32::MAX))
}

const SELECT_CALL: &str = r#"
    SELECT id, customer_id, conversation_id, call_sid, status, duration_secs,
           summary, failure_reason, created_at, updated_at, completed_at
    FROM calls
"#;

#[async_trait]
impl CallRepository for PostgresCallRepository {
    async fn save(&self, call: &Call) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO calls (
                id, customer_id, conversation_id, call_sid, status, duration_secs,
                summary, failure_reason, created_at, updated_at, completed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(call.id().as_uuid())
        .bind(call.customer_id().as_uuid())
        .bind(call.conversation_id().map(|c| c.as_str()))
        .bind(call.call_sid())
        .bind(call.status().as_str())
        .bind(duration_to_db(call.duration_secs()))
        .bind(call.summary())
        .bind(call.failure_reason())
        .bind(call.created_at().as_datetime())
        .bind(call.updated_at().as_datetime())
        .bind(call.completed_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(DomainError::new(
                    ErrorCode::CustomerNotFound,
                    format!("Customer not found: {}", call.customer_id()),
                ))
            }
            Err(e) => Err(DomainError::database("Failed to insert call", e)),
        }
    }

    async fn update(&self, call: &Call) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE calls SET
                conversation_id = $2,
                call_sid = $3,
                status = $4,
                duration_secs = $5,
                summary = $6,
                failure_reason = $7,
                updated_at = $8,
                completed_at = $9
            WHERE id = $1
            "#,
        )
        .bind(call.id().as_uuid())
        .bind(call.conversation_id().map(|c| c.as_str()))
        .bind(call.call_sid())
        .bind(call.status().as_str())
        .bind(duration_to_db(call.duration_secs()))
        .bind(call.summary())
        .bind(call.failure_reason())
        .bind(call.updated_at().as_datetime())
        .bind(call.completed_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update call", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CallNotFound,
                format!("Call not found: {}", call.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: CallId) -> Result<Option<Call>, DomainError> {
        let row: Option<CallRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_CALL))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch call", e))?;

        row.map(Call::try_from).transpose()
    }

    async fn find_by_conversation_id(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<Call>, DomainError> {
        let row: Option<CallRow> =
            sqlx::query_as(&format!("{} WHERE conversation_id = $1", SELECT_CALL))
                .bind(conversation_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to fetch call by conversation", e))?;

        row.map(Call::try_from).transpose()
    }

    async fn list(
        &self,
        status: Option<CallStatus>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Call>, DomainError> {
        let rows: Vec<CallRow> = sqlx::query_as(&format!(
            r#"{}
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3"#,
            SELECT_CALL
        ))
        .bind(status.map(|s| s.as_str()))
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list calls", e))?;

        rows.into_iter().map(Call::try_from).collect()
    }

    async fn list_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Call>, DomainError> {
        let rows: Vec<CallRow> = sqlx::query_as(&format!(
            "{} WHERE customer_id = $1 ORDER BY created_at DESC, id",
            SELECT_CALL
        ))
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list calls for customer", e))?;

        rows.into_iter().map(Call::try_from).collect()
    }
}
