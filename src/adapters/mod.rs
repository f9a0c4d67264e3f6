//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - PostgreSQL persistence (sqlx)
//! - `memory` - In-memory persistence for tests and local runs
//! - `voice` - Conversational voice platform client and webhook verification
//! - `csv` - Customer list ingestion and response export
//! - `http` - Axum REST API

pub mod csv;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod voice;
