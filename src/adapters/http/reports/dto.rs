//! HTTP DTOs for report endpoints.

use serde::Serialize;

use crate::ports::QuestionStats;

/// Per-question breakdown, in question order.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionStatsResponse {
    pub questions: Vec<QuestionStats>,
}
