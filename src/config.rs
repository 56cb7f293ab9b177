//! Client configuration and per-request options.
//!
//! [`ClientConfig`] holds the global defaults shared by every call made
//! through one [`crate::Client`]; [`RequestOptions`] overrides them for a
//! single call. Per-request values always win.

use std::time::Duration;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.hookbase.app";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default maximum number of retry attempts for failed requests.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configuration for the Hookbase API client.
///
/// # Examples
///
/// ```
/// use hookbase::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_max_retries(5);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// Request timeout applied to every call unless overridden per request.
    pub timeout: Duration,
    /// Maximum number of retry attempts for transient failures.
    pub max_retries: u32,
    /// When set, request and response bodies are logged at debug level.
    pub debug: bool,
    /// Custom HTTP client to execute requests with.
    ///
    /// When `None`, the client builds its own `reqwest::Client` using
    /// `timeout`. A supplied client is used as-is; its own timeout settings
    /// apply instead of `timeout`.
    pub http_client: Option<reqwest::Client>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            debug: false,
            http_client: None,
        }
    }
}

impl ClientConfig {
    /// Set the API base URL. Trailing slashes are trimmed.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        while url.ends_with('/') {
            url.pop();
        }
        self.base_url = url;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Enable debug logging of request and response bodies.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Supply a custom HTTP client.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

/// Options for a single API request.
///
/// Each field, when set, overrides the corresponding [`ClientConfig`]
/// default for that call only.
///
/// # Examples
///
/// ```
/// use hookbase::RequestOptions;
/// use std::time::Duration;
///
/// let opts = RequestOptions::new()
///     .with_timeout(Duration::from_secs(5))
///     .with_idempotency_key("order-42-create");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Timeout override for this request.
    pub timeout: Option<Duration>,
    /// Retry count override for this request.
    pub max_retries: Option<u32>,
    /// Idempotency key, letting the API deduplicate retried requests.
    pub idempotency_key: Option<String>,
}

impl RequestOptions {
    /// Create empty options; every field falls back to the client default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the timeout for this request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the retry count for this request.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Set an idempotency key for safe retries of non-idempotent requests.
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
