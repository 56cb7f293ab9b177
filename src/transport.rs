//! Request transport shared by every resource.
//!
//! One logical call flows through [`Transport::request`] (or
//! [`Transport::request_empty`] when no response body is expected): the body
//! is serialized once, then dispatched with auth and idempotency headers,
//! the response is classified into a typed [`Error`] on failure, and
//! transient failures are retried with exponential backoff. Retry state is
//! local to one call; nothing is shared across concurrent requests beyond
//! the read-only configuration and the underlying `reqwest::Client`.

use std::time::Duration;

use bytes::Bytes;
use rand::Rng;
use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ClientConfig, RequestOptions};
use crate::error::{ApiErrorDetails, Error, ValidationErrors};

const USER_AGENT: &str = concat!("hookbase-rust/", env!("CARGO_PKG_VERSION"));

/// Marker for requests without a body.
pub(crate) const NO_BODY: Option<&()> = None;

/// Base delay for attempt 0, in milliseconds.
const BACKOFF_BASE_MS: u64 = 1_000;
/// Cap on the exponential portion of the backoff, in milliseconds.
const BACKOFF_CAP_MS: u64 = 10_000;
/// Upper bound (exclusive) of the uniform jitter, in milliseconds.
const BACKOFF_JITTER_MS: u64 = 1_000;

/// Executes API requests with authentication, classification, and retries.
#[derive(Clone)]
pub(crate) struct Transport {
    api_key: String,
    base_url: String,
    max_retries: u32,
    debug: bool,
    http: reqwest::Client,
}

impl Transport {
    /// Build a transport from the client configuration.
    ///
    /// # Panics
    ///
    /// Panics if no HTTP client was supplied and one cannot be constructed,
    /// which only happens when the TLS backend fails to initialize. The SDK
    /// is unusable in that state, so this is a construction-time fatal.
    pub(crate) fn new(api_key: String, config: &ClientConfig) -> Self {
        let http = match &config.http_client {
            Some(client) => client.clone(),
            None => reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .expect("hookbase: failed to build HTTP client"),
        };

        Self {
            api_key,
            base_url: config.base_url.clone(),
            max_retries: config.max_retries,
            debug: config.debug,
            http,
        }
    }

    /// Execute a request and deserialize the response body into `T`.
    pub(crate) async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        opts: &RequestOptions,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response_body = self.dispatch(method, path, query, body, opts).await?;
        let response_body = response_body
            .filter(|b| !b.is_empty())
            .ok_or_else(|| Error::protocol("failed to decode response: empty body"))?;
        serde_json::from_slice(&response_body)
            .map_err(|e| Error::protocol(format!("failed to decode response: {}", e)))
    }

    /// Execute a request, discarding any response body.
    pub(crate) async fn request_empty<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        opts: &RequestOptions,
    ) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        self.dispatch(method, path, query, body, opts).await?;
        Ok(())
    }

    /// Run the retry loop for one logical call.
    ///
    /// Returns the raw response body on success, or `None` for a 204 or an
    /// empty body. Attempts are strictly sequential; the body is serialized
    /// exactly once and the same bytes go out on every attempt.
    async fn dispatch<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        opts: &RequestOptions,
    ) -> Result<Option<Bytes>, Error>
    where
        B: Serialize + ?Sized,
    {
        let max_retries = opts.max_retries.unwrap_or(self.max_retries);
        let url = format!("{}{}", self.base_url, path);

        let body_bytes: Option<Bytes> = match body {
            Some(body) => Some(
                serde_json::to_vec(body)
                    .map_err(|e| Error::protocol(format!("failed to encode request body: {}", e)))?
                    .into(),
            ),
            None => None,
        };

        if self.debug {
            debug!(method = %method, url = %url, "dispatching request");
            if let Some(bytes) = &body_bytes {
                debug!(body = %String::from_utf8_lossy(bytes), "request body");
            }
        }

        let mut attempt: u32 = 0;
        loop {
            let mut request = self.http.request(method.clone(), &url);
            if !query.is_empty() {
                request = request.query(query);
            }
            request = request
                .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
                .header(header::USER_AGENT, USER_AGENT)
                .header(header::ACCEPT, "application/json");
            if let Some(bytes) = &body_bytes {
                request = request
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(bytes.clone());
            }
            if let Some(key) = &opts.idempotency_key {
                request = request.header("Idempotency-Key", key.clone());
            }
            if let Some(timeout) = opts.timeout {
                request = request.timeout(timeout);
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    // Cancellation wins over the retry policy: an elapsed
                    // deadline is terminal for this call.
                    if e.is_timeout() {
                        return Err(Error::timeout(e.to_string()));
                    }
                    let err = Error::network(e.to_string(), Some(e));
                    if attempt < max_retries {
                        backoff(attempt).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(err);
                }
            };

            let status = response.status();
            let request_id = header_str(&response, "x-request-id");
            let retry_after = header_str(&response, header::RETRY_AFTER.as_str())
                .and_then(|v| v.parse::<u64>().ok());

            let response_body = match response.bytes().await {
                Ok(bytes) => bytes,
                Err(e) => {
                    if e.is_timeout() {
                        return Err(Error::timeout(e.to_string()));
                    }
                    let err = Error::network("failed to read response body", Some(e));
                    if attempt < max_retries {
                        backoff(attempt).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(err);
                }
            };

            if self.debug {
                debug!(
                    status = status.as_u16(),
                    body = %String::from_utf8_lossy(&response_body),
                    "response"
                );
            }

            if status.is_success() {
                if status == StatusCode::NO_CONTENT || response_body.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(response_body));
            }

            let err = classify_response(status.as_u16(), &response_body, request_id, retry_after);
            match &err {
                // The request itself is wrong or unauthorized; resending
                // will not help.
                Error::Authentication(_)
                | Error::Forbidden(_)
                | Error::NotFound(_)
                | Error::Validation { .. } => return Err(err),
                // Server-directed backoff overrides the exponential curve.
                Error::RateLimit {
                    retry_after_secs, ..
                } => {
                    if attempt < max_retries {
                        tokio::time::sleep(Duration::from_secs(*retry_after_secs)).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(err);
                }
                _ => {
                    if attempt < max_retries {
                        backoff(attempt).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(err);
                }
            }
        }
    }
}

// Never expose the API key in debug output.
impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("api_key", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .field("max_retries", &self.max_retries)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

fn header_str(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Sleep before retrying attempt `attempt` (0-indexed).
async fn backoff(attempt: u32) {
    tokio::time::sleep(backoff_delay(attempt)).await;
}

/// Delay for attempt `attempt`: `min(1000 * 2^attempt, 10000)` milliseconds
/// plus a uniform jitter in `[0, 1000)` milliseconds. The jitter spreads
/// retries from concurrent callers instead of synchronizing them.
fn backoff_delay(attempt: u32) -> Duration {
    let base = BACKOFF_BASE_MS
        .saturating_mul(2u64.saturating_pow(attempt))
        .min(BACKOFF_CAP_MS);
    let jitter = rand::rng().random_range(0..BACKOFF_JITTER_MS);
    Duration::from_millis(base + jitter)
}

/// Error envelope returned by the API.
///
/// Errors arrive either nested (`{"error": {"message", "code",
/// "validationErrors"}}`) or flat (`{"message", "code"}`); both are
/// accepted, preferring the nested form.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorBody>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(rename = "validationErrors", default)]
    validation_errors: Option<ValidationErrors>,
}

/// Map a non-2xx response onto the error taxonomy.
fn classify_response(
    status: u16,
    body: &[u8],
    request_id: Option<String>,
    retry_after: Option<u64>,
) -> Error {
    let envelope: ErrorEnvelope = serde_json::from_slice(body).unwrap_or_default();
    let (nested_message, nested_code, validation_errors) = match envelope.error {
        Some(body) => (body.message, body.code, body.validation_errors),
        None => (None, None, None),
    };

    let message = nested_message
        .or(envelope.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("API error: {}", status));
    let code = nested_code
        .or(envelope.code)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "unknown_error".to_string());

    let details = ApiErrorDetails {
        status,
        code,
        message,
        request_id,
    };

    match status {
        401 => Error::Authentication(details),
        403 => Error::Forbidden(details),
        404 => Error::NotFound(details),
        400 | 422 => Error::Validation {
            details,
            errors: validation_errors.unwrap_or_default(),
        },
        429 => Error::RateLimit {
            details,
            retry_after_secs: retry_after.unwrap_or(60),
        },
        _ => Error::Api(details),
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
