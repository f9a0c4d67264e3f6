//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, call status, errors)
//! - `customer` - The call list
//! - `call` - Outbound calls and their lifecycle
//! - `survey` - Survey script, transcript classifier and sentiment
//! - `webhook` - Signature verification for platform webhooks

pub mod call;
pub mod customer;
pub mod foundation;
pub mod survey;
pub mod webhook;
