//! Customer list reader.
//!
//! Accepts any column order. Headers are matched case-insensitively after
//! trimming; `name` and one of `phone`/`phone_number` are required, `email`
//! and `company` are optional and unknown columns are ignored.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::application::handlers::customer::{
    CustomerRecord, ImportCustomersCommand, ImportRowError,
};

/// The file as a whole could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsvImportError {
    #[error("CSV file is empty")]
    Empty,

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("unreadable header row: {0}")]
    Header(String),
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    name: usize,
    phone: usize,
    email: Option<usize>,
    company: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, CsvImportError> {
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(CsvImportError::Empty);
        }

        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };

        Ok(Self {
            name: find(&["name"]).ok_or(CsvImportError::MissingColumn("name"))?,
            phone: find(&["phone", "phone_number"])
                .ok_or(CsvImportError::MissingColumn("phone"))?,
            email: find(&["email"]),
            company: find(&["company"]),
        })
    }

    fn record(&self, line: u64, row: &StringRecord) -> CustomerRecord {
        let text = |idx: usize| row.get(idx).map(str::trim).unwrap_or_default().to_string();
        let optional = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        CustomerRecord {
            line,
            name: text(self.name),
            phone_number: text(self.phone),
            email: optional(self.email),
            company: optional(self.company),
        }
    }
}

/// Reads a customer CSV into an import command.
///
/// Rows the CSV parser cannot decode are carried as `unreadable` with their
/// line number; field validation happens in the import handler.
///
/// # Errors
///
/// Fails only when the header row is missing, unreadable or lacks a
/// required column.
pub fn read_customers<R: Read>(input: R) -> Result<ImportCustomersCommand, CsvImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| CsvImportError::Header(e.to_string()))?
        .clone();
    let columns = Columns::resolve(&headers)?;

    let mut command = ImportCustomersCommand::default();
    for result in reader.records() {
        match result {
            Ok(row) => {
                let line = row.position().map(|p| p.line()).unwrap_or_default();
                command.records.push(columns.record(line, &row));
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                command
                    .unreadable
                    .push(ImportRowError::new(line, format!("unreadable row: {}", e)));
            }
        }
    }

    tracing::debug!(
        rows = command.records.len(),
        unreadable = command.unreadable.len(),
        "Parsed customer CSV"
    );
    Ok(command)
}
