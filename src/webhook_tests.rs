//! Tests for webhook signature verification.

use super::*;

const SECRET: &str = "dGVzdC1zZWNyZXQ=";
const PAYLOAD: &[u8] = br#"{"event":"test"}"#;

fn signed_headers(webhook: &Webhook) -> HashMap<String, String> {
    webhook.generate_test_headers(PAYLOAD, Some("msg_1"))
}

fn message_of(err: Error) -> String {
    match err {
        Error::WebhookVerification { message } => message,
        other => panic!("expected webhook verification error, got {:?}", other),
    }
}

mod construction {
    use super::*;

    /// Verify an empty secret is rejected at construction time.
    #[test]
    #[should_panic(expected = "webhook secret is required")]
    fn test_empty_secret_panics() {
        Webhook::new("");
    }

    /// Verify the whsec_ prefix is stripped before decoding: both forms
    /// produce the same key.
    #[test]
    fn test_whsec_prefix_equivalent() {
        let plain = Webhook::new(SECRET);
        let prefixed = Webhook::new(&format!("whsec_{}", SECRET));

        let headers = signed_headers(&plain);
        prefixed.verify(PAYLOAD, &headers).unwrap();
    }

    /// Verify a secret that is not valid base64 is used as raw key bytes.
    #[test]
    fn test_raw_secret_fallback() {
        let webhook = Webhook::new("not base64!!");
        let headers = signed_headers(&webhook);
        webhook.verify(PAYLOAD, &headers).unwrap();
    }

    /// Verify debug output never exposes the secret.
    #[test]
    fn test_debug_redacts_secret() {
        let webhook = Webhook::new(SECRET);
        let debug = format!("{:?}", webhook);
        assert!(debug.contains("<REDACTED>"));
        assert!(!debug.contains("test-secret"));
    }
}

mod verification {
    use super::*;

    /// Verify a freshly signed delivery round-trips.
    #[test]
    fn test_valid_signature() {
        let webhook = Webhook::new(SECRET);
        let headers = signed_headers(&webhook);
        webhook.verify(PAYLOAD, &headers).unwrap();
    }

    /// Verify a delivery signed with a different secret is rejected with
    /// the generic failure message.
    #[test]
    fn test_wrong_secret_rejected() {
        let signer = Webhook::new("b3RoZXItc2VjcmV0");
        let verifier = Webhook::new(SECRET);

        let headers = signed_headers(&signer);
        let err = verifier.verify(PAYLOAD, &headers).unwrap_err();
        assert_eq!(message_of(err), "signature verification failed");
    }

    /// Verify a tampered payload is rejected.
    #[test]
    fn test_tampered_payload_rejected() {
        let webhook = Webhook::new(SECRET);
        let headers = signed_headers(&webhook);
        let err = webhook
            .verify(br#"{"event":"Test"}"#, &headers)
            .unwrap_err();
        assert_eq!(message_of(err), "signature verification failed");
    }

    /// Verify a tampered webhook id is rejected; the id is part of the
    /// signed content.
    #[test]
    fn test_tampered_id_rejected() {
        let webhook = Webhook::new(SECRET);
        let mut headers = signed_headers(&webhook);
        headers.insert("webhook-id".to_string(), "msg_2".to_string());
        let err = webhook.verify(PAYLOAD, &headers).unwrap_err();
        assert_eq!(message_of(err), "signature verification failed");
    }

    /// Verify a well-formed signature under an unknown version is skipped
    /// and the delivery rejected.
    #[test]
    fn test_unknown_version_rejected() {
        let webhook = Webhook::new(SECRET);
        let mut headers = signed_headers(&webhook);
        let sig = headers["webhook-signature"].clone();
        headers.insert(
            "webhook-signature".to_string(),
            sig.replacen("v1,", "v2,", 1),
        );

        let err = webhook.verify(PAYLOAD, &headers).unwrap_err();
        assert_eq!(message_of(err), "signature verification failed");
    }

    /// Verify a header with no parseable version,signature entries is
    /// rejected up front.
    #[test]
    fn test_no_parseable_entries() {
        let webhook = Webhook::new(SECRET);
        let mut headers = signed_headers(&webhook);
        headers.insert("webhook-signature".to_string(), "garbage".to_string());

        let err = webhook.verify(PAYLOAD, &headers).unwrap_err();
        assert_eq!(message_of(err), "no valid signatures found");
    }

    /// Verify any one matching v1 entry is sufficient, so rotated secrets
    /// can sign with multiple entries in flight.
    #[test]
    fn test_multiple_signature_entries() {
        let webhook = Webhook::new(SECRET);
        let mut headers = signed_headers(&webhook);
        let sig = headers["webhook-signature"].clone();
        headers.insert(
            "webhook-signature".to_string(),
            format!("v2,bm90LXJlYWw= v1,bm90LXJlYWw= {}", sig),
        );

        webhook.verify(PAYLOAD, &headers).unwrap();
    }

    /// Verify header lookup is case-insensitive.
    #[test]
    fn test_case_insensitive_headers() {
        let webhook = Webhook::new(SECRET);
        let headers: HashMap<String, String> = signed_headers(&webhook)
            .into_iter()
            .map(|(k, v)| (k.to_uppercase(), v))
            .collect();

        webhook.verify(PAYLOAD, &headers).unwrap();
    }

    /// Verify each missing header is reported by name.
    #[test]
    fn test_missing_headers() {
        let webhook = Webhook::new(SECRET);
        for (name, expected) in [
            ("webhook-id", "missing webhook-id header"),
            ("webhook-timestamp", "missing webhook-timestamp header"),
            ("webhook-signature", "missing webhook-signature header"),
        ] {
            let mut headers = signed_headers(&webhook);
            headers.remove(name);
            let err = webhook.verify(PAYLOAD, &headers).unwrap_err();
            assert_eq!(message_of(err), expected);
        }
    }

    /// Verify an empty header value counts as missing.
    #[test]
    fn test_empty_header_value_counts_as_missing() {
        let webhook = Webhook::new(SECRET);
        let mut headers = signed_headers(&webhook);
        headers.insert("webhook-id".to_string(), String::new());
        let err = webhook.verify(PAYLOAD, &headers).unwrap_err();
        assert_eq!(message_of(err), "missing webhook-id header");
    }

    /// Verify a non-numeric timestamp is rejected.
    #[test]
    fn test_invalid_timestamp_format() {
        let webhook = Webhook::new(SECRET);
        let mut headers = signed_headers(&webhook);
        headers.insert(
            "webhook-timestamp".to_string(),
            "yesterday".to_string(),
        );
        let err = webhook.verify(PAYLOAD, &headers).unwrap_err();
        assert_eq!(message_of(err), "invalid timestamp format");
    }
}

mod tolerance {
    use super::*;

    fn headers_with_drift(webhook: &Webhook, drift_secs: i64) -> HashMap<String, String> {
        let mut headers = webhook.generate_test_headers(PAYLOAD, Some("msg_1"));
        let ts: i64 = headers["webhook-timestamp"].parse().unwrap();
        headers.insert("webhook-timestamp".to_string(), (ts - drift_secs).to_string());
        headers
    }

    /// Verify a timestamp older than the tolerance window is rejected
    /// before any signature work.
    #[test]
    fn test_expired_timestamp_rejected() {
        let webhook = Webhook::new(SECRET);
        let headers = headers_with_drift(&webhook, 600);
        let err = webhook.verify(PAYLOAD, &headers).unwrap_err();
        assert!(
            message_of(err).starts_with("timestamp outside tolerance"),
            "unexpected message"
        );
    }

    /// Verify a future timestamp beyond the window is rejected too; the
    /// check is symmetric.
    #[test]
    fn test_future_timestamp_rejected() {
        let webhook = Webhook::new(SECRET);
        let headers = headers_with_drift(&webhook, -600);
        let err = webhook.verify(PAYLOAD, &headers).unwrap_err();
        assert!(message_of(err).starts_with("timestamp outside tolerance"));
    }

    /// Verify a custom tolerance widens or narrows the window.
    #[test]
    fn test_custom_tolerance() {
        let webhook = Webhook::new(SECRET);
        let headers = headers_with_drift(&webhook, 100);

        // Note: drifting the timestamp invalidates the signature, so a
        // widened window must fail at the signature step, not the
        // timestamp step.
        let err = webhook
            .verify_with_tolerance(PAYLOAD, &headers, 50)
            .unwrap_err();
        assert!(message_of(err).starts_with("timestamp outside tolerance"));

        let err = webhook
            .verify_with_tolerance(PAYLOAD, &headers, 200)
            .unwrap_err();
        assert_eq!(message_of(err), "signature verification failed");
    }
}

mod parsing {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Event {
        event: String,
    }

    /// Verify a signed payload is parsed after verification.
    #[test]
    fn test_verify_and_parse() {
        let webhook = Webhook::new(SECRET);
        let headers = signed_headers(&webhook);
        let event: Event = webhook.verify_and_parse(PAYLOAD, &headers).unwrap();
        assert_eq!(event.event, "test");
    }

    /// Verify a payload that verifies but does not deserialize is a
    /// protocol error, not a verification failure.
    #[test]
    fn test_verified_but_unparsable_payload() {
        let webhook = Webhook::new(SECRET);
        let payload = b"not json";
        let headers = webhook.generate_test_headers(payload, None);
        let result: Result<Event, Error> = webhook.verify_and_parse(payload, &headers);
        assert!(matches!(result.unwrap_err(), Error::Protocol { .. }));
    }

    /// Verify an unverified payload is never parsed.
    #[test]
    fn test_unverified_payload_not_parsed() {
        let webhook = Webhook::new(SECRET);
        let other = Webhook::new("b3RoZXItc2VjcmV0");
        let headers = signed_headers(&other);
        let result: Result<Event, Error> = webhook.verify_and_parse(PAYLOAD, &headers);
        assert!(matches!(
            result.unwrap_err(),
            Error::WebhookVerification { .. }
        ));
    }
}

mod test_headers {
    use super::*;

    /// Verify generated headers use the default id when none is given.
    #[test]
    fn test_default_webhook_id() {
        let webhook = Webhook::new(SECRET);
        let headers = webhook.generate_test_headers(PAYLOAD, None);
        assert_eq!(headers["webhook-id"], "msg_test");
        assert!(headers["webhook-signature"].starts_with("v1,"));
        webhook.verify(PAYLOAD, &headers).unwrap();
    }

    /// Verify a supplied id is used and signed.
    #[test]
    fn test_custom_webhook_id() {
        let webhook = Webhook::new(SECRET);
        let headers = webhook.generate_test_headers(PAYLOAD, Some("msg_42"));
        assert_eq!(headers["webhook-id"], "msg_42");
        webhook.verify(PAYLOAD, &headers).unwrap();
    }
}
