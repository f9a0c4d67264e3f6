//! Webhook error types for voice platform webhook handling.

use thiserror::Error;

/// Errors that occur while authenticating or decoding a webhook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Signature header absent while a secret is configured.
    #[error("Missing signature header")]
    MissingSignature,

    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Webhook timestamp is older than the tolerance window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Event timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Failed to parse webhook payload or signature header.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl WebhookError {
    /// True when the delivery could not be authenticated, as opposed to a
    /// malformed body.
    pub fn is_authentication_failure(&self) -> bool {
        !matches!(self, WebhookError::ParseError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_failures_are_authentication_failures() {
        assert!(WebhookError::InvalidSignature.is_authentication_failure());
        assert!(WebhookError::MissingSignature.is_authentication_failure());
        assert!(WebhookError::TimestampOutOfRange.is_authentication_failure());
        assert!(WebhookError::InvalidTimestamp.is_authentication_failure());
    }

    #[test]
    fn parse_failures_are_not_authentication_failures() {
        assert!(!WebhookError::ParseError("bad json".to_string()).is_authentication_failure());
    }
}
