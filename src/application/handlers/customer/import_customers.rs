//! ImportCustomersHandler - Command handler for bulk customer ingestion.
//!
//! Rows are validated and saved independently. A bad row never aborts the
//! import; it is reported with its line number instead.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::customer::{Customer, PhoneNumber};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CustomerRepository;

/// One data row of an import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    /// 1-based line in the source file.
    pub line: u64,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub company: Option<String>,
}

/// A row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRowError {
    pub line: u64,
    pub message: String,
}

impl ImportRowError {
    pub fn new(line: u64, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Command to import parsed rows.
#[derive(Debug, Clone, Default)]
pub struct ImportCustomersCommand {
    pub records: Vec<CustomerRecord>,
    /// Rows the reader could not decode at all.
    pub unreadable: Vec<ImportRowError>,
}

/// Outcome of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: u64,
    pub duplicates: u64,
    pub errors: Vec<ImportRowError>,
}

/// Handler for importing customers.
pub struct ImportCustomersHandler {
    repository: Arc<dyn CustomerRepository>,
}

impl ImportCustomersHandler {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    /// Imports every valid row.
    ///
    /// # Errors
    ///
    /// Only infrastructure failures abort the import.
    pub async fn handle(&self, cmd: ImportCustomersCommand) -> Result<ImportReport, DomainError> {
        let mut report = ImportReport {
            errors: cmd.unreadable,
            ..Default::default()
        };

        for record in cmd.records {
            let customer = match build_customer(&record) {
                Ok(customer) => customer,
                Err(message) => {
                    report.errors.push(ImportRowError::new(record.line, message));
                    continue;
                }
            };

            match self.repository.save(&customer).await {
                Ok(()) => report.imported += 1,
                Err(e) if e.code == ErrorCode::DuplicatePhoneNumber => report.duplicates += 1,
                Err(e) => return Err(e),
            }
        }

        report.errors.sort_by_key(|e| e.line);

        tracing::info!(
            imported = report.imported,
            duplicates = report.duplicates,
            rejected = report.errors.len(),
            "Customer import finished"
        );
        Ok(report)
    }
}

fn build_customer(record: &CustomerRecord) -> Result<Customer, String> {
    let phone = PhoneNumber::parse(&record.phone_number).map_err(|e| e.to_string())?;
    Customer::new(
        &record.name,
        phone,
        record.email.as_deref(),
        record.company.as_deref(),
    )
    .map_err(|e| e.to_string())
}
