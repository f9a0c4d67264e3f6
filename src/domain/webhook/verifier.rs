//! Voice platform webhook signature verification.
//!
//! The platform signs each delivery with HMAC-SHA256 over
//! `"<timestamp>.<raw body>"` and sends `t=<timestamp>,v0=<hex digest>`
//! in the `ElevenLabs-Signature` header.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::WebhookError;

/// Name of the signature header.
pub const SIGNATURE_HEADER: &str = "ElevenLabs-Signature";

/// Maximum allowed age for webhook deliveries (30 minutes).
const MAX_EVENT_AGE_SECS: i64 = 30 * 60;

/// Maximum allowed clock skew for future deliveries (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components of the signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// HMAC-SHA256 digest.
    pub v0_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parses a header of the form `t=<timestamp>,v0=<hex>`.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::ParseError` if the header format is invalid.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut v0_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or_else(|| WebhookError::ParseError("invalid header format".to_string()))?;

            match key {
                "t" => {
                    timestamp = Some(value.parse().map_err(|_| {
                        WebhookError::ParseError("invalid timestamp".to_string())
                    })?);
                }
                "v0" => {
                    v0_signature = Some(hex::decode(value).map_err(|_| {
                        WebhookError::ParseError("invalid v0 signature hex".to_string())
                    })?);
                }
                _ => {}
            }
        }

        let timestamp =
            timestamp.ok_or_else(|| WebhookError::ParseError("missing timestamp".to_string()))?;
        let v0_signature = v0_signature
            .ok_or_else(|| WebhookError::ParseError("missing v0 signature".to_string()))?;

        Ok(SignatureHeader {
            timestamp,
            v0_signature,
        })
    }
}

/// Verifier for voice platform webhook signatures.
pub struct WebhookVerifier {
    secret: String,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies the signature header against the raw payload.
    ///
    /// # Errors
    ///
    /// - `ParseError` - malformed header
    /// - `TimestampOutOfRange` - delivery older than 30 minutes
    /// - `InvalidTimestamp` - delivery from the future
    /// - `InvalidSignature` - digest mismatch
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<(), WebhookError> {
        self.verify_at(payload, signature_header, chrono::Utc::now().timestamp())
    }

    fn verify_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<(), WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;

        let age = now
            .checked_sub(header.timestamp)
            .ok_or(WebhookError::TimestampOutOfRange)?;
        if age > MAX_EVENT_AGE_SECS {
            tracing::warn!(age_secs = age, "Webhook delivery too old");
            return Err(WebhookError::TimestampOutOfRange);
        }
        if age < -MAX_CLOCK_SKEW_SECS {
            tracing::warn!(age_secs = age, "Webhook delivery from the future");
            return Err(WebhookError::InvalidTimestamp);
        }

        let expected = compute_signature(&self.secret, header.timestamp, payload)?;
        if !constant_time_compare(&expected, &header.v0_signature) {
            return Err(WebhookError::InvalidSignature);
        }

        Ok(())
    }
}

fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, WebhookError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|_| WebhookError::InvalidSignature)?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Builds a valid signature header, for signing fixtures in tests.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let digest = compute_signature(secret, timestamp, payload).unwrap_or_default();
    format!("t={},v0={}", timestamp, hex::encode(digest))
}
