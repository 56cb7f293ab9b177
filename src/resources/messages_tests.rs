//! Tests for the messages resource.

use super::*;
use crate::{Client, ClientConfig};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_max_retries(0);
    Client::with_config("test-key", config)
}

/// Verify send flattens params with the application id and maps queued
/// endpoints to pending deliveries.
#[tokio::test]
async fn test_send_maps_queued_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/send-event"))
        .and(body_json(json!({
            "applicationId": "app_1",
            "eventType": "order.created",
            "payload": {"orderId": 42}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "eventId": "evt_1",
                "messagesQueued": 2,
                "endpoints": [
                    {"id": "ep_1", "url": "https://a.example/hook"},
                    {"id": "ep_2", "url": "https://b.example/hook"}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = SendMessageParams {
        event_type: "order.created".to_string(),
        payload: HashMap::from([("orderId".to_string(), json!(42))]),
        ..Default::default()
    };
    let resp = client
        .messages()
        .send("app_1", &params, &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(resp.message_id, "evt_1");
    assert_eq!(resp.outbound_messages.len(), 2);
    assert_eq!(resp.outbound_messages[0].endpoint_id, "ep_1");
    assert_eq!(resp.outbound_messages[0].status, MessageStatus::Pending);
}

/// Verify list always scopes to the application and unwraps the cursor
/// envelope.
#[tokio::test]
async fn test_list_cursor_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/outbound-messages"))
        .and(query_param("applicationId", "app_1"))
        .and(query_param("status", "failed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "id": "out_1",
                    "messageId": "evt_1",
                    "endpointId": "ep_1",
                    "eventType": "order.created",
                    "status": "failed",
                    "attempts": 3,
                    "maxAttempts": 5
                }
            ],
            "pagination": {"hasMore": true, "nextCursor": "cur_2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = ListOutboundMessagesParams {
        status: Some(MessageStatus::Failed),
        ..Default::default()
    };
    let page = client
        .messages()
        .list("app_1", Some(&params), &RequestOptions::new())
        .await
        .unwrap();

    assert!(page.has_more);
    assert_eq!(page.next_cursor.as_deref(), Some("cur_2"));
    let message = &page.items()[0];
    assert_eq!(message.status, MessageStatus::Failed);
    assert_eq!(message.attempts, 3);
}

/// Verify get unwraps the data envelope.
#[tokio::test]
async fn test_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/outbound-messages/out_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "out_1", "messageId": "evt_1", "status": "success"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let message = client
        .messages()
        .get("out_1", &RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(message.status, MessageStatus::Success);
}

/// Verify delivery attempts are unwrapped from the data envelope.
#[tokio::test]
async fn test_list_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/outbound-messages/out_1/attempts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "id": "att_1",
                    "outboundMessageId": "out_1",
                    "attemptNumber": 1,
                    "responseStatus": 500,
                    "latencyMs": 120,
                    "attemptedAt": "2026-01-01T00:00:00Z"
                },
                {
                    "id": "att_2",
                    "outboundMessageId": "out_1",
                    "attemptNumber": 2,
                    "responseStatus": 200,
                    "attemptedAt": "2026-01-01T00:01:00Z"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let attempts = client
        .messages()
        .list_attempts("out_1", &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0].response_status, Some(500));
    assert_eq!(attempts[1].attempt_number, 2);
}

/// Verify retry maps the replay response onto a pending skeleton message.
#[tokio::test]
async fn test_retry_maps_replay_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/outbound-messages/out_1/replay"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "originalMessageId": "out_1",
                "newMessageId": "out_2",
                "status": "pending"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let message = client
        .messages()
        .retry("out_1", &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(message.id, "out_2");
    assert_eq!(message.message_id, "out_1");
    assert_eq!(message.status, MessageStatus::Pending);
}
