//! CSV adapters - customer list ingestion and response export.

mod customer_reader;
mod response_writer;

pub use customer_reader::{read_customers, CsvImportError};
pub use response_writer::write_responses;
