//! Error types for Hookbase SDK operations.
//!
//! All failures surface as a single closed [`Error`] enum so callers can
//! branch on kind rather than message text. Each API-originated variant
//! carries the status code, machine-readable error code, and request id
//! returned by the API, and the [`Error::is_retryable`] classification
//! drives the transport's retry loop.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Metadata shared by every error originating from an API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorDetails {
    /// HTTP status code of the response.
    pub status: u16,
    /// Machine-readable error code from the response envelope.
    pub code: String,
    /// Human-readable message from the response envelope.
    pub message: String,
    /// Request id from the `X-Request-Id` response header, when present.
    pub request_id: Option<String>,
}

impl fmt::Display for ApiErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API error {} ({}): {}",
            self.status, self.code, self.message
        )?;
        if let Some(id) = &self.request_id {
            write!(f, " [request_id={}]", id)?;
        }
        Ok(())
    }
}

/// Field name to violation messages, as reported by 400/422 responses.
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

/// Errors returned by the Hookbase SDK.
///
/// The set is closed: every operation in this crate fails with exactly one
/// of these variants. Message text is for logs and humans; retry decisions
/// and caller branching go through the variant itself.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The API key is invalid or missing (401).
    #[error("hookbase: {0}")]
    Authentication(ApiErrorDetails),

    /// Authenticated but not authorized for the resource (403).
    #[error("hookbase: {0}")]
    Forbidden(ApiErrorDetails),

    /// The requested resource does not exist (404).
    #[error("hookbase: {0}")]
    NotFound(ApiErrorDetails),

    /// Request validation failed (400/422), with per-field violations.
    #[error("hookbase: {details}{}", fmt_validation(.errors))]
    Validation {
        details: ApiErrorDetails,
        errors: ValidationErrors,
    },

    /// The rate limit was exceeded (429).
    ///
    /// `retry_after_secs` comes from the `Retry-After` response header and
    /// defaults to 60 when the header is absent or unparsable.
    #[error("hookbase: {details}")]
    RateLimit {
        details: ApiErrorDetails,
        retry_after_secs: u64,
    },

    /// Any other non-2xx response, typically a 5xx server error.
    #[error("hookbase: {0}")]
    Api(ApiErrorDetails),

    /// The request deadline fired before a response was obtained.
    #[error("hookbase: request timed out: {message}")]
    Timeout { message: String },

    /// A transport-level failure: connection refused, DNS, body read.
    #[error("hookbase: network error: {message}{}", fmt_cause(.source))]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Webhook signature verification failed.
    ///
    /// Produced only by [`crate::webhook::Webhook`], never by the transport.
    #[error("hookbase: webhook verification failed: {message}")]
    WebhookVerification { message: String },

    /// A request body could not be encoded or a response body decoded.
    #[error("hookbase: {message}")]
    Protocol { message: String },
}

fn fmt_validation(errors: &ValidationErrors) -> String {
    if errors.is_empty() {
        String::new()
    } else {
        format!(" (validation: {:?})", errors)
    }
}

fn fmt_cause(source: &Option<reqwest::Error>) -> String {
    match source {
        Some(cause) => format!(": {}", cause),
        None => String::new(),
    }
}

impl Error {
    pub(crate) fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub(crate) fn network(message: impl Into<String>, source: Option<reqwest::Error>) -> Self {
        Self::Network {
            message: message.into(),
            source,
        }
    }

    pub(crate) fn webhook_verification(message: impl Into<String>) -> Self {
        Self::WebhookVerification {
            message: message.into(),
        }
    }

    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Check if resending the same request may succeed.
    ///
    /// Rate limits, transport failures, and generic API errors (5xx) are
    /// retryable. Authentication, authorization, not-found, and validation
    /// failures indicate the request itself is wrong and never retry.
    /// Timeouts are terminal: the caller's deadline has already fired.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimit { .. } | Self::Api(_) | Self::Network { .. }
        )
    }

    /// Server-directed delay before the next attempt, if the API sent one.
    ///
    /// Returns `Some` only for [`Error::RateLimit`]; all other retryable
    /// errors use the transport's exponential backoff curve.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimit {
                retry_after_secs, ..
            } => Some(Duration::from_secs(*retry_after_secs)),
            _ => None,
        }
    }

    /// HTTP status code, for API-originated errors.
    pub fn status(&self) -> Option<u16> {
        self.api_details().map(|d| d.status)
    }

    /// Request id reported by the API, when present.
    pub fn request_id(&self) -> Option<&str> {
        self.api_details().and_then(|d| d.request_id.as_deref())
    }

    /// Shared API metadata, for API-originated errors.
    pub fn api_details(&self) -> Option<&ApiErrorDetails> {
        match self {
            Self::Authentication(d)
            | Self::Forbidden(d)
            | Self::NotFound(d)
            | Self::Api(d)
            | Self::Validation { details: d, .. }
            | Self::RateLimit { details: d, .. } => Some(d),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
