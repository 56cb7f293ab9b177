//! Inbound events received by sources.

use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::RequestOptions;
use crate::error::Error;
use crate::pagination::Page;
use crate::transport::{Transport, NO_BODY};

/// Delivery status of an inbound event across its routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InboundEventStatus {
    #[default]
    Pending,
    Delivered,
    Failed,
    Partial,
}

impl InboundEventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
            Self::Partial => "partial",
        }
    }
}

/// Delivery counts for an event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeliveryStats {
    pub total: i64,
    pub delivered: i64,
    pub failed: i64,
    pub pending: i64,
}

/// A received webhook event, as returned by list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InboundEvent {
    pub id: String,
    pub source_id: String,
    pub organization_id: String,
    pub event_type: Option<String>,
    pub payload_hash: Option<String>,
    pub signature_valid: Option<i64>,
    pub received_at: String,
    pub ip_address: Option<String>,
    pub source_name: String,
    pub source_slug: String,
    pub status: InboundEventStatus,
    pub delivery_stats: Option<DeliveryStats>,
}

/// Delivery info embedded in an event detail.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDeliveryInfo {
    pub id: String,
    pub destination_id: String,
    pub destination_name: String,
    pub destination_url: String,
    pub status: String,
    pub status_code: Option<i64>,
    pub attempts: i64,
    pub created_at: String,
    pub completed_at: Option<String>,
}

/// Full event detail including payload and deliveries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDetail {
    pub id: String,
    pub source_id: String,
    pub event_type: Option<String>,
    pub payload: Value,
    #[serde(with = "super::embedded_json")]
    pub headers: HashMap<String, String>,
    pub signature_valid: Option<i64>,
    pub received_at: String,
    pub ip_address: Option<String>,
    pub source_name: String,
    #[serde(skip)]
    pub deliveries: Vec<EventDeliveryInfo>,
}

/// Parameters for listing events.
///
/// Events paginate by `limit`/`offset` on the wire; the result is still
/// surfaced as a [`Page`].
#[derive(Debug, Clone, Default)]
pub struct ListEventsParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub source_id: Option<String>,
    pub event_type: Option<String>,
    pub search: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub signature_valid: Option<bool>,
    pub status: Option<InboundEventStatus>,
}

impl ListEventsParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        if let Some(source_id) = &self.source_id {
            query.push(("sourceId", source_id.clone()));
        }
        if let Some(event_type) = &self.event_type {
            query.push(("eventType", event_type.clone()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(from_date) = &self.from_date {
            query.push(("fromDate", from_date.clone()));
        }
        if let Some(to_date) = &self.to_date {
            query.push(("toDate", to_date.clone()));
        }
        if let Some(signature_valid) = self.signature_valid {
            // The API expects "0" or "1" here.
            query.push(("signatureValid", i32::from(signature_valid).to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        query
    }
}

/// Access to event endpoints.
pub struct Events<'a> {
    pub(crate) transport: &'a Transport,
}

impl Events<'_> {
    /// List events, newest first.
    pub async fn list(
        &self,
        params: Option<&ListEventsParams>,
        opts: &RequestOptions,
    ) -> Result<Page<InboundEvent>, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            events: Vec<InboundEvent>,
            #[serde(default)]
            total: u64,
            #[serde(default)]
            limit: u64,
            #[serde(default)]
            offset: u64,
        }

        let query = params.map(ListEventsParams::to_query).unwrap_or_default();
        let resp: Envelope = self
            .transport
            .request(Method::GET, "/api/events", &query, NO_BODY, opts)
            .await?;

        let has_more = resp.offset + resp.limit < resp.total;
        Ok(Page {
            data: resp.events,
            total: resp.total,
            page: resp.offset / resp.limit.max(1) + 1,
            page_size: resp.limit,
            has_more,
        })
    }

    /// Get full event detail including payload and deliveries.
    pub async fn get(&self, id: &str, opts: &RequestOptions) -> Result<EventDetail, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            event: EventDetail,
            #[serde(default)]
            deliveries: Vec<EventDeliveryInfo>,
        }

        let mut resp: Envelope = self
            .transport
            .request(
                Method::GET,
                &format!("/api/events/{}", id),
                &[],
                NO_BODY,
                opts,
            )
            .await?;
        resp.event.deliveries = resp.deliveries;
        Ok(resp.event)
    }
}
