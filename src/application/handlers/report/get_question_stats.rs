//! GetQuestionStatsHandler - Per-question response and sentiment counts.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::{QuestionStats, ReportReader};

pub struct GetQuestionStatsHandler {
    reader: Arc<dyn ReportReader>,
}

impl GetQuestionStatsHandler {
    pub fn new(reader: Arc<dyn ReportReader>) -> Self {
        Self { reader }
    }

    /// Stats for all five questions in order.
    pub async fn handle(&self) -> Result<Vec<QuestionStats>, DomainError> {
        let mut stats = self.reader.question_stats().await?;
        stats.sort_by_key(|s| s.question_number);
        Ok(stats)
    }
}
