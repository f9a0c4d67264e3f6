//! Voice Survey - Outbound phone surveys over a conversational voice platform
//!
//! Places survey calls to a customer list, receives signed post-call
//! webhooks, turns transcripts into per-question answers with sentiment and
//! serves reports over a REST API backed by PostgreSQL.
//!
//! Layout follows ports and adapters:
//! - `domain` - customers, calls, the survey script and classifier
//! - `ports` - persistence and voice platform traits
//! - `application` - command and query handlers
//! - `adapters` - PostgreSQL, in-memory, voice platform, CSV and HTTP
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
