//! Survey response export.

use serde::Serialize;

use crate::ports::ResponseExportRow;

#[derive(Serialize)]
struct CsvRow<'a> {
    call_id: String,
    customer_name: &'a str,
    phone_number: &'a str,
    question_number: u8,
    question_text: &'a str,
    answer: &'a str,
    sentiment: &'static str,
    source: &'static str,
    created_at: String,
}

impl<'a> From<&'a ResponseExportRow> for CsvRow<'a> {
    fn from(row: &'a ResponseExportRow) -> Self {
        Self {
            call_id: row.call_id.to_string(),
            customer_name: &row.customer_name,
            phone_number: &row.phone_number,
            question_number: row.question_number.get(),
            question_text: &row.question_text,
            answer: &row.answer,
            sentiment: row.sentiment.as_str(),
            source: row.source.as_str(),
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

/// Renders export rows as CSV with a header line.
///
/// The header is written even when there are no rows.
pub fn write_responses(rows: &[ResponseExportRow]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record([
        "call_id",
        "customer_name",
        "phone_number",
        "question_number",
        "question_text",
        "answer",
        "sentiment",
        "source",
        "created_at",
    ])?;
    for row in rows {
        writer.serialize(CsvRow::from(row))?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}
