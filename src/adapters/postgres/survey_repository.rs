//! PostgreSQL implementation of SurveyRepository.
//!
//! Transcripts are stored as JSONB. Responses are replaced per call inside
//! a transaction so readers never see a half-written set.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::foundation::{CallId, DomainError, ErrorCode, ResponseId, Timestamp};
use crate::domain::survey::{QuestionNumber, SurveyResponse, Transcript};
use crate::ports::SurveyRepository;

/// PostgreSQL implementation of the SurveyRepository port.
#[derive(Clone)]
pub struct PostgresSurveyRepository {
    pool: PgPool,
}

impl PostgresSurveyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx query mapping.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct ResponseRow {
    pub id: uuid::Uuid,
    pub call_id: uuid::Uuid,
    pub question_number: i16,
    pub question_text: String,
    pub answer: String,
    pub sentiment: String,
    pub source: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<ResponseRow> for SurveyResponse {
    type Error = DomainError;

    fn try_from(row: ResponseRow) -> Result<Self, Self::Error> {
        Ok(SurveyResponse {
            id: ResponseId::from_uuid(row.id),
            call_id: CallId::from_uuid(row.call_id),
            question_number: question_from_db(row.question_number)?,
            question_text: row.question_text,
            answer: row.answer,
            sentiment: row.sentiment.parse().map_err(invalid_column)?,
            source: row.source.parse().map_err(invalid_column)?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

pub(super) fn question_from_db(n: i16) -> Result<QuestionNumber, DomainError> {
    u8::try_from(n)
        .ok()
        .and_then(|n| QuestionNumber::new(n).ok())
        .ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid question number: {}", n),
            )
        })
}

pub(super) fn invalid_column(err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Invalid column value: {}", err))
}

#[async_trait]
impl SurveyRepository for PostgresSurveyRepository {
    async fn save_transcript(
        &self,
        call_id: CallId,
        transcript: &Transcript,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO transcripts (call_id, turns)
            VALUES ($1, $2)
            ON CONFLICT (call_id) DO UPDATE SET turns = EXCLUDED.turns
            "#,
        )
        .bind(call_id.as_uuid())
        .bind(Json(transcript))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save transcript", e))?;

        Ok(())
    }

    async fn find_transcript(&self, call_id: CallId) -> Result<Option<Transcript>, DomainError> {
        let row: Option<(Json<Transcript>,)> =
            sqlx::query_as("SELECT turns FROM transcripts WHERE call_id = $1")
                .bind(call_id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to fetch transcript", e))?;

        Ok(row.map(|(Json(transcript),)| transcript))
    }

    async fn replace_responses(
        &self,
        call_id: CallId,
        responses: &[SurveyResponse],
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        sqlx::query("DELETE FROM survey_responses WHERE call_id = $1")
            .bind(call_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to clear responses", e))?;

        for response in responses {
            sqlx::query(
                r#"
                INSERT INTO survey_responses (
                    id, call_id, question_number, question_text, answer,
                    sentiment, source, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (call_id, question_number) DO UPDATE SET
                    question_text = EXCLUDED.question_text,
                    answer = EXCLUDED.answer,
                    sentiment = EXCLUDED.sentiment,
                    source = EXCLUDED.source
                "#,
            )
            .bind(response.id.as_uuid())
            .bind(call_id.as_uuid())
            .bind(i16::from(response.question_number.get()))
            .bind(&response.question_text)
            .bind(&response.answer)
            .bind(response.sentiment.as_str())
            .bind(response.source.as_str())
            .bind(response.created_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to insert response", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit responses", e))?;

        Ok(())
    }

    async fn responses_for_call(&self, call_id: CallId) -> Result<Vec<SurveyResponse>, DomainError> {
        let rows: Vec<ResponseRow> = sqlx::query_as(
            r#"
            SELECT id, call_id, question_number, question_text, answer,
                   sentiment, source, created_at
            FROM survey_responses
            WHERE call_id = $1
            ORDER BY question_number
            "#,
        )
        .bind(call_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch responses", e))?;

        rows.into_iter().map(SurveyResponse::try_from).collect()
    }
}
