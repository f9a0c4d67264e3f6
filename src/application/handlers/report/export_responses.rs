//! ExportResponsesHandler - Every stored answer, flattened for export.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::{ReportReader, ResponseExportRow};

pub struct ExportResponsesHandler {
    reader: Arc<dyn ReportReader>,
}

impl ExportResponsesHandler {
    pub fn new(reader: Arc<dyn ReportReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self) -> Result<Vec<ResponseExportRow>, DomainError> {
        let rows = self.reader.export_rows().await?;
        tracing::debug!(rows = rows.len(), "Exporting survey responses");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySurveyStore;

    #[tokio::test]
    async fn empty_store_exports_nothing() {
        let rows = ExportResponsesHandler::new(Arc::new(InMemorySurveyStore::new()))
            .handle()
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}
