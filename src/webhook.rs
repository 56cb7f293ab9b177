//! Webhook signature verification.
//!
//! Hookbase signs every delivery with HMAC-SHA256 over
//! `"{id}.{timestamp}.{payload}"` and sends the result in three headers:
//! `webhook-id`, `webhook-timestamp`, and `webhook-signature`. [`Webhook`]
//! verifies those deliveries: it authenticates the payload against the
//! shared signing secret, bounds the replay window through a timestamp
//! tolerance check, and compares signatures in constant time to prevent
//! timing attacks.
//!
//! This module is independent of the API client and usable standalone by
//! any service that receives Hookbase webhooks.
//!
//! # Examples
//!
//! ```
//! use hookbase::Webhook;
//!
//! let webhook = Webhook::new("whsec_dGVzdC1zZWNyZXQ=");
//!
//! let payload = br#"{"event":"order.created"}"#;
//! let headers = webhook.generate_test_headers(payload, Some("msg_1"));
//!
//! webhook.verify(payload, &headers).expect("valid delivery");
//! ```

use std::collections::HashMap;
use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::Error;

type HmacSha256 = Hmac<Sha256>;

/// Default timestamp tolerance, in seconds (5 minutes).
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

const ID_HEADER: &str = "webhook-id";
const TIMESTAMP_HEADER: &str = "webhook-timestamp";
const SIGNATURE_HEADER: &str = "webhook-signature";

/// Recognized signature scheme version token.
const SIGNATURE_VERSION: &str = "v1";

/// Verifies signed webhook deliveries.
pub struct Webhook {
    secret: Vec<u8>,
}

impl Webhook {
    /// Create a verifier from a signing secret.
    ///
    /// The secret may carry a `whsec_` prefix and is expected to be
    /// base64-encoded; a value that does not decode as base64 is used as
    /// raw key bytes.
    ///
    /// # Panics
    ///
    /// Panics if `secret` is empty. A verifier without a key would accept
    /// nothing and a caller must not be able to proceed unauthenticated, so
    /// this is a construction-time fatal, not a recoverable error.
    pub fn new(secret: &str) -> Self {
        assert!(!secret.is_empty(), "hookbase: webhook secret is required");

        let stripped = secret.strip_prefix("whsec_").unwrap_or(secret);
        let secret = BASE64
            .decode(stripped)
            .unwrap_or_else(|_| stripped.as_bytes().to_vec());

        Self { secret }
    }

    /// Verify a webhook delivery with the default 5 minute tolerance.
    ///
    /// `headers` must contain `webhook-id`, `webhook-timestamp`, and
    /// `webhook-signature`; lookup is case-insensitive.
    pub fn verify(&self, payload: &[u8], headers: &HashMap<String, String>) -> Result<(), Error> {
        self.verify_with_tolerance(payload, headers, DEFAULT_TOLERANCE_SECS)
    }

    /// Verify a webhook delivery with a custom timestamp tolerance.
    ///
    /// A delivery whose timestamp differs from the current time by more
    /// than `tolerance_secs` (in either direction) is rejected, bounding
    /// the window in which a captured delivery can be replayed.
    pub fn verify_with_tolerance(
        &self,
        payload: &[u8],
        headers: &HashMap<String, String>,
        tolerance_secs: i64,
    ) -> Result<(), Error> {
        let id = header_value(headers, ID_HEADER)
            .ok_or_else(|| Error::webhook_verification("missing webhook-id header"))?;
        let timestamp = header_value(headers, TIMESTAMP_HEADER)
            .ok_or_else(|| Error::webhook_verification("missing webhook-timestamp header"))?;
        let signature_header = header_value(headers, SIGNATURE_HEADER)
            .ok_or_else(|| Error::webhook_verification("missing webhook-signature header"))?;

        let ts: i64 = timestamp
            .parse()
            .map_err(|_| Error::webhook_verification("invalid timestamp format"))?;

        let now = Utc::now().timestamp();
        let drift = (now - ts).abs();
        if drift > tolerance_secs {
            return Err(Error::webhook_verification(format!(
                "timestamp outside tolerance ({}s > {}s)",
                drift, tolerance_secs
            )));
        }

        let expected = self.mac(id, timestamp, payload);

        let entries = parse_signature_header(signature_header);
        if entries.is_empty() {
            return Err(Error::webhook_verification("no valid signatures found"));
        }

        // Any v1 entry may match; unknown versions are skipped so secrets
        // can be rotated with multiple signatures in flight.
        for entry in entries {
            if entry.version != SIGNATURE_VERSION {
                continue;
            }
            let Ok(provided) = BASE64.decode(entry.signature) else {
                continue;
            };
            if provided.len() == expected.len() && bool::from(provided.ct_eq(&expected)) {
                return Ok(());
            }
        }

        // Deliberately generic: which step failed is not leaked.
        Err(Error::webhook_verification("signature verification failed"))
    }

    /// Verify a delivery, then deserialize its payload.
    ///
    /// A payload that verifies but does not parse is reported as
    /// [`Error::Protocol`], distinct from a verification failure.
    pub fn verify_and_parse<T: DeserializeOwned>(
        &self,
        payload: &[u8],
        headers: &HashMap<String, String>,
    ) -> Result<T, Error> {
        self.verify(payload, headers)?;
        serde_json::from_slice(payload)
            .map_err(|e| Error::protocol(format!("failed to parse webhook payload: {}", e)))
    }

    /// Generate a valid header triple for `payload`, for use in tests.
    ///
    /// Uses the current wall-clock timestamp and the same signing scheme
    /// as the platform, so generated headers always pass [`Webhook::verify`].
    /// `webhook_id` defaults to `msg_test`.
    pub fn generate_test_headers(
        &self,
        payload: &[u8],
        webhook_id: Option<&str>,
    ) -> HashMap<String, String> {
        let id = webhook_id.unwrap_or("msg_test");
        let timestamp = Utc::now().timestamp().to_string();
        let signature = BASE64.encode(self.mac(id, &timestamp, payload));

        HashMap::from([
            (ID_HEADER.to_string(), id.to_string()),
            (TIMESTAMP_HEADER.to_string(), timestamp),
            (
                SIGNATURE_HEADER.to_string(),
                format!("{},{}", SIGNATURE_VERSION, signature),
            ),
        ])
    }

    /// HMAC-SHA256 over the signed content `"{id}.{timestamp}.{payload}"`.
    ///
    /// The payload is fed in as raw bytes, so non-UTF-8 payloads sign the
    /// exact bytes that were delivered.
    fn mac(&self, id: &str, timestamp: &str, payload: &[u8]) -> Vec<u8> {
        // HMAC accepts keys of any length; new_from_slice cannot fail.
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC-SHA256 accepts keys of any length");
        mac.update(id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

// Never expose the secret in debug output.
impl fmt::Debug for Webhook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Webhook")
            .field("secret", &"<REDACTED>")
            .finish()
    }
}

/// Case-insensitive header lookup. Empty values count as missing.
fn header_value<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
}

struct SignatureEntry<'a> {
    version: &'a str,
    signature: &'a str,
}

/// Parse a signature header of space-separated `version,signature` entries.
/// Parts without a comma are dropped.
fn parse_signature_header(header: &str) -> Vec<SignatureEntry<'_>> {
    header
        .split(' ')
        .filter_map(|part| {
            part.split_once(',')
                .map(|(version, signature)| SignatureEntry { version, signature })
        })
        .collect()
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
