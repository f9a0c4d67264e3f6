//! Report reader port (read side).
//!
//! Aggregate views over customers, calls and responses for the reporting
//! endpoints and the CSV export.

use crate::domain::foundation::{CallId, DomainError, Timestamp};
use crate::domain::survey::{QuestionNumber, ResponseSource, Sentiment};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reader port for reporting queries.
#[async_trait]
pub trait ReportReader: Send + Sync {
    /// Customer and call totals.
    async fn summary(&self) -> Result<SurveySummary, DomainError>;

    /// Per-question counts for all five questions, in question order.
    ///
    /// Questions without any response are included with zero counts.
    async fn question_stats(&self) -> Result<Vec<QuestionStats>, DomainError>;

    /// Every stored response joined with its customer, oldest call first.
    async fn export_rows(&self) -> Result<Vec<ResponseExportRow>, DomainError>;
}

/// Calls grouped by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub failed: u64,
}

impl StatusCounts {
    pub fn total(&self) -> u64 {
        self.pending + self.in_progress + self.completed + self.failed
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveySummary {
    pub total_customers: u64,
    pub calls: StatusCounts,
    pub total_responses: u64,
    /// Mean duration over calls that reported one.
    pub average_duration_secs: Option<f64>,
}

impl SurveySummary {
    /// Completed calls over all calls, 0.0 when nothing was dialled.
    pub fn completion_rate(&self) -> f64 {
        let total = self.calls.total();
        if total == 0 {
            0.0
        } else {
            self.calls.completed as f64 / total as f64
        }
    }
}

/// Response count and sentiment breakdown for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionStats {
    pub question_number: QuestionNumber,
    pub question_text: String,
    pub responses: u64,
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

impl QuestionStats {
    /// Empty stats for a question.
    pub fn empty(question_number: QuestionNumber) -> Self {
        Self {
            question_number,
            question_text: question_number.question().text.to_string(),
            responses: 0,
            positive: 0,
            neutral: 0,
            negative: 0,
        }
    }

    /// Count one response with the given sentiment.
    pub fn record(&mut self, sentiment: Sentiment) {
        self.add(sentiment, 1);
    }

    /// Counts `n` responses with the same sentiment.
    pub fn add(&mut self, sentiment: Sentiment, n: u64) {
        self.responses += n;
        match sentiment {
            Sentiment::Positive => self.positive += n,
            Sentiment::Neutral => self.neutral += n,
            Sentiment::Negative => self.negative += n,
        }
    }
}

/// One line of the responses CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseExportRow {
    pub call_id: CallId,
    pub customer_name: String,
    pub phone_number: String,
    pub question_number: QuestionNumber,
    pub question_text: String,
    pub answer: String,
    pub sentiment: Sentiment,
    pub source: ResponseSource,
    pub created_at: Timestamp,
}
