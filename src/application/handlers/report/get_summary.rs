//! GetSummaryHandler - Headline numbers for the survey dashboard.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::DomainError;
use crate::ports::{ReportReader, SurveySummary};

/// Summary with derived rates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    #[serde(flatten)]
    pub summary: SurveySummary,
    /// Completed calls as a percentage of all calls, one decimal.
    pub completion_rate: f64,
}

pub struct GetSummaryHandler {
    reader: Arc<dyn ReportReader>,
}

impl GetSummaryHandler {
    pub fn new(reader: Arc<dyn ReportReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self) -> Result<SummaryReport, DomainError> {
        let summary = self.reader.summary().await?;
        let completion_rate = (summary.completion_rate() * 1000.0).round() / 10.0;
        Ok(SummaryReport {
            summary,
            completion_rate,
        })
    }
}
