//! Outbound webhook messages and delivery attempts.

use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::RequestOptions;
use crate::error::Error;
use crate::pagination::{CursorPage, CursorPagination};
use crate::transport::{Transport, NO_BODY};

/// Delivery status of an outbound message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    #[default]
    Pending,
    Success,
    Failed,
    Exhausted,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Exhausted => "exhausted",
        }
    }
}

/// An outbound webhook message, one per endpoint per event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutboundMessage {
    pub id: String,
    /// The event this delivery belongs to.
    pub message_id: String,
    pub endpoint_id: String,
    pub endpoint_url: String,
    pub event_type: String,
    pub status: MessageStatus,
    pub attempts: i64,
    pub max_attempts: i64,
    pub last_attempt_at: Option<String>,
    pub next_attempt_at: Option<String>,
    pub last_response_status: Option<i64>,
    pub last_response_body: Option<String>,
    pub last_error: Option<String>,
    pub delivered_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A single delivery attempt for an outbound message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageAttempt {
    pub id: String,
    pub outbound_message_id: String,
    pub attempt_number: i64,
    pub response_status: Option<i64>,
    pub response_body: Option<String>,
    pub response_headers: HashMap<String, String>,
    pub error: Option<String>,
    pub latency_ms: Option<i64>,
    pub attempted_at: String,
}

/// Parameters for sending a message.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageParams {
    pub event_type: String,
    pub payload: HashMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_ids: Option<Vec<String>>,
}

/// A delivery queued by [`Messages::send`].
#[derive(Debug, Clone)]
pub struct QueuedMessage {
    pub id: String,
    pub endpoint_id: String,
    pub status: MessageStatus,
}

/// Result of sending a message.
#[derive(Debug, Clone)]
pub struct SendMessageResponse {
    pub message_id: String,
    pub outbound_messages: Vec<QueuedMessage>,
}

/// Parameters for listing outbound messages.
#[derive(Debug, Clone, Default)]
pub struct ListOutboundMessagesParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub endpoint_id: Option<String>,
    pub message_id: Option<String>,
    pub status: Option<MessageStatus>,
    pub event_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ListOutboundMessagesParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            query.push(("cursor", cursor.clone()));
        }
        if let Some(endpoint_id) = &self.endpoint_id {
            query.push(("endpointId", endpoint_id.clone()));
        }
        if let Some(message_id) = &self.message_id {
            query.push(("messageId", message_id.clone()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(event_type) = &self.event_type {
            query.push(("eventType", event_type.clone()));
        }
        if let Some(start_date) = &self.start_date {
            query.push(("startDate", start_date.clone()));
        }
        if let Some(end_date) = &self.end_date {
            query.push(("endDate", end_date.clone()));
        }
        query
    }
}

/// Access to message endpoints.
pub struct Messages<'a> {
    pub(crate) transport: &'a Transport,
}

impl Messages<'_> {
    /// Send a webhook event to an application's subscribed endpoints.
    pub async fn send(
        &self,
        application_id: &str,
        params: &SendMessageParams,
        opts: &RequestOptions,
    ) -> Result<SendMessageResponse, Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            application_id: &'a str,
            #[serde(flatten)]
            params: &'a SendMessageParams,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct QueuedEndpoint {
            id: String,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            event_id: String,
            #[serde(default)]
            endpoints: Vec<QueuedEndpoint>,
        }

        #[derive(Deserialize)]
        struct Envelope {
            data: Data,
        }

        let body = Body {
            application_id,
            params,
        };
        let resp: Envelope = self
            .transport
            .request(Method::POST, "/api/send-event", &[], Some(&body), opts)
            .await?;

        let outbound_messages = resp
            .data
            .endpoints
            .into_iter()
            .map(|ep| QueuedMessage {
                endpoint_id: ep.id.clone(),
                id: ep.id,
                status: MessageStatus::Pending,
            })
            .collect();
        Ok(SendMessageResponse {
            message_id: resp.data.event_id,
            outbound_messages,
        })
    }

    /// List an application's outbound messages, cursor-paginated.
    pub async fn list(
        &self,
        application_id: &str,
        params: Option<&ListOutboundMessagesParams>,
        opts: &RequestOptions,
    ) -> Result<CursorPage<OutboundMessage>, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            data: Vec<OutboundMessage>,
            #[serde(default)]
            pagination: CursorPagination,
        }

        let mut query = vec![("applicationId", application_id.to_string())];
        if let Some(params) = params {
            query.extend(params.to_query());
        }
        let resp: Envelope = self
            .transport
            .request(Method::GET, "/api/outbound-messages", &query, NO_BODY, opts)
            .await?;
        Ok(CursorPage::from_cursor(resp.data, resp.pagination))
    }

    /// Get an outbound message by ID.
    pub async fn get(&self, id: &str, opts: &RequestOptions) -> Result<OutboundMessage, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            data: OutboundMessage,
        }

        let resp: Envelope = self
            .transport
            .request(
                Method::GET,
                &format!("/api/outbound-messages/{}", id),
                &[],
                NO_BODY,
                opts,
            )
            .await?;
        Ok(resp.data)
    }

    /// List delivery attempts for an outbound message.
    pub async fn list_attempts(
        &self,
        id: &str,
        opts: &RequestOptions,
    ) -> Result<Vec<MessageAttempt>, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            data: Vec<MessageAttempt>,
        }

        let resp: Envelope = self
            .transport
            .request(
                Method::GET,
                &format!("/api/outbound-messages/{}/attempts", id),
                &[],
                NO_BODY,
                opts,
            )
            .await?;
        Ok(resp.data)
    }

    /// Replay a failed outbound message.
    ///
    /// Returns a skeleton message whose `id` is the new delivery and whose
    /// `message_id` is the original; fetch it for full state.
    pub async fn retry(&self, id: &str, opts: &RequestOptions) -> Result<OutboundMessage, Error> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            original_message_id: String,
            new_message_id: String,
        }

        #[derive(Deserialize)]
        struct Envelope {
            data: Data,
        }

        let resp: Envelope = self
            .transport
            .request(
                Method::POST,
                &format!("/api/outbound-messages/{}/replay", id),
                &[],
                NO_BODY,
                opts,
            )
            .await?;
        Ok(OutboundMessage {
            id: resp.data.new_message_id,
            message_id: resp.data.original_message_id,
            status: MessageStatus::Pending,
            ..Default::default()
        })
    }
}

#[cfg(test)]
#[path = "messages_tests.rs"]
mod tests;
