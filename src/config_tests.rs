//! Tests for client configuration.

use super::*;

mod client_config {
    use super::*;

    /// Verify default configuration values.
    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
        assert!(!config.debug);
        assert!(config.http_client.is_none());
    }

    /// Verify builder methods set each field.
    #[test]
    fn test_builders() {
        let config = ClientConfig::default()
            .with_base_url("https://example.test")
            .with_timeout(Duration::from_secs(5))
            .with_max_retries(7)
            .with_debug(true);

        assert_eq!(config.base_url, "https://example.test");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 7);
        assert!(config.debug);
    }

    /// Verify trailing slashes are trimmed from the base URL.
    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ClientConfig::default().with_base_url("https://example.test/");
        assert_eq!(config.base_url, "https://example.test");

        let config = ClientConfig::default().with_base_url("https://example.test///");
        assert_eq!(config.base_url, "https://example.test");
    }

    /// Verify a supplied HTTP client is stored.
    #[test]
    fn test_custom_http_client() {
        let config = ClientConfig::default().with_http_client(reqwest::Client::new());
        assert!(config.http_client.is_some());
    }
}

mod request_options {
    use super::*;

    /// Verify new options carry no overrides.
    #[test]
    fn test_empty_by_default() {
        let opts = RequestOptions::new();
        assert!(opts.timeout.is_none());
        assert!(opts.max_retries.is_none());
        assert!(opts.idempotency_key.is_none());
    }

    /// Verify builder methods set each override.
    #[test]
    fn test_builders() {
        let opts = RequestOptions::new()
            .with_timeout(Duration::from_secs(2))
            .with_max_retries(0)
            .with_idempotency_key("order-42-create");

        assert_eq!(opts.timeout, Some(Duration::from_secs(2)));
        assert_eq!(opts.max_retries, Some(0));
        assert_eq!(opts.idempotency_key.as_deref(), Some("order-42-create"));
    }
}
