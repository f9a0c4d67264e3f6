//! Webhook authentication for voice platform deliveries.

mod errors;
mod verifier;

pub use errors::WebhookError;
pub use verifier::{sign_payload, SignatureHeader, WebhookVerifier, SIGNATURE_HEADER};
