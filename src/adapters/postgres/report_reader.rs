//! PostgreSQL implementation of ReportReader.

use async_trait::async_trait;
use sqlx::PgPool;

use super::survey_repository::{invalid_column, question_from_db};
use crate::domain::foundation::{CallId, DomainError, Timestamp};
use crate::domain::survey::{QuestionNumber, Sentiment};
use crate::ports::{QuestionStats, ReportReader, ResponseExportRow, StatusCounts, SurveySummary};

/// PostgreSQL implementation of the ReportReader port.
#[derive(Clone)]
pub struct PostgresReportReader {
    pool: PgPool,
}

impl PostgresReportReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    total_customers: i64,
    pending: i64,
    in_progress: i64,
    completed: i64,
    failed: i64,
    total_responses: i64,
    average_duration_secs: Option<f64>,
}

#[derive(Debug, sqlx::FromRow)]
struct SentimentCountRow {
    question_number: i16,
    sentiment: String,
    responses: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct ExportRow {
    call_id: uuid::Uuid,
    customer_name: String,
    phone_number: String,
    question_number: i16,
    question_text: String,
    answer: String,
    sentiment: String,
    source: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

fn count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or_default()
}

/// Folds (question, sentiment, count) rows into stats for all five questions.
fn fold_question_stats(rows: Vec<SentimentCountRow>) -> Result<Vec<QuestionStats>, DomainError> {
    let mut stats: Vec<QuestionStats> = QuestionNumber::all().map(QuestionStats::empty).collect();
    for row in rows {
        let question = question_from_db(row.question_number)?;
        let sentiment: Sentiment = row.sentiment.parse().map_err(invalid_column)?;
        if let Some(entry) = stats.iter_mut().find(|s| s.question_number == question) {
            entry.add(sentiment, count(row.responses));
        }
    }
    Ok(stats)
}

#[async_trait]
impl ReportReader for PostgresReportReader {
    async fn summary(&self) -> Result<SurveySummary, DomainError> {
        let row: SummaryRow = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM customers) AS total_customers,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                COUNT(*) FILTER (WHERE status = 'failed') AS failed,
                (SELECT COUNT(*) FROM survey_responses) AS total_responses,
                AVG(duration_secs)::FLOAT8 AS average_duration_secs
            FROM calls
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load survey summary", e))?;

        Ok(SurveySummary {
            total_customers: count(row.total_customers),
            calls: StatusCounts {
                pending: count(row.pending),
                in_progress: count(row.in_progress),
                completed: count(row.completed),
                failed: count(row.failed),
            },
            total_responses: count(row.total_responses),
            average_duration_secs: row.average_duration_secs,
        })
    }

    async fn question_stats(&self) -> Result<Vec<QuestionStats>, DomainError> {
        let rows: Vec<SentimentCountRow> = sqlx::query_as(
            r#"
            SELECT question_number, sentiment, COUNT(*) AS responses
            FROM survey_responses
            GROUP BY question_number, sentiment
            ORDER BY question_number
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load question stats", e))?;

        fold_question_stats(rows)
    }

    async fn export_rows(&self) -> Result<Vec<ResponseExportRow>, DomainError> {
        let rows: Vec<ExportRow> = sqlx::query_as(
            r#"
            SELECT r.call_id, cu.name AS customer_name, cu.phone_number,
                   r.question_number, r.question_text, r.answer,
                   r.sentiment, r.source, r.created_at
            FROM survey_responses r
            JOIN calls c ON c.id = r.call_id
            JOIN customers cu ON cu.id = c.customer_id
            ORDER BY c.created_at, c.id, r.question_number
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to export responses", e))?;

        rows.into_iter()
            .map(|row| {
                Ok(ResponseExportRow {
                    call_id: CallId::from_uuid(row.call_id),
                    customer_name: row.customer_name,
                    phone_number: row.phone_number,
                    question_number: question_from_db(row.question_number)?,
                    question_text: row.question_text,
                    answer: row.answer,
                    sentiment: row.sentiment.parse().map_err(invalid_column)?,
                    source: row.source.parse().map_err(invalid_column)?,
                    created_at: Timestamp::from_datetime(row.created_at),
                })
            })
            .collect()
    }
}
