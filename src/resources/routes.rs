//! Routes connecting sources to destinations.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::RequestOptions;
use crate::error::Error;
use crate::pagination::{OffsetPagination, Page};
use crate::transport::{Transport, NO_BODY};

/// Circuit breaker state of a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitState {
    #[default]
    Closed,
    Open,
    HalfOpen,
}

/// A single event filter condition attached to a route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCondition {
    pub field: String,
    pub operator: String,
    pub value: Value,
}

/// A route from a source to a destination.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Route {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    pub source_id: String,
    pub destination_id: String,
    #[serde(with = "super::flex_bool")]
    pub is_active: bool,
    pub priority: i64,
    #[serde(with = "super::embedded_json")]
    pub filter_conditions: Vec<FilterCondition>,
    pub circuit_state: CircuitState,
    pub circuit_opened_at: Option<String>,
    pub circuit_cooldown_seconds: Option<i64>,
    pub circuit_failure_threshold: Option<i64>,
    #[serde(with = "super::flex_bool")]
    pub notify_on_failure: bool,
    #[serde(with = "super::flex_bool")]
    pub notify_on_success: bool,
    #[serde(with = "super::flex_bool")]
    pub notify_on_recovery: bool,
    pub notify_emails: Option<String>,
    pub failure_threshold: Option<i64>,
    pub failover_destination_ids: Vec<String>,
    pub failover_after_attempts: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Parameters for creating a route.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteParams {
    pub name: String,
    pub source_id: String,
    pub destination_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_conditions: Option<Vec<FilterCondition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_on_failure: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_on_success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_on_recovery: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_emails: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failover_destination_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failover_after_attempts: Option<i64>,
}

/// Parameters for updating a route.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRouteParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_conditions: Option<Vec<FilterCondition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_on_failure: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_on_success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_on_recovery: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_emails: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failover_destination_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failover_after_attempts: Option<i64>,
}

/// Parameters for listing routes.
#[derive(Debug, Clone, Default)]
pub struct ListRoutesParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub source_id: Option<String>,
    pub destination_id: Option<String>,
    pub is_active: Option<bool>,
}

impl ListRoutesParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            query.push(("pageSize", page_size.to_string()));
        }
        if let Some(source_id) = &self.source_id {
            query.push(("sourceId", source_id.clone()));
        }
        if let Some(destination_id) = &self.destination_id {
            query.push(("destinationId", destination_id.clone()));
        }
        if let Some(is_active) = self.is_active {
            query.push(("isActive", is_active.to_string()));
        }
        query
    }
}

/// Access to route endpoints.
pub struct Routes<'a> {
    pub(crate) transport: &'a Transport,
}

impl Routes<'_> {
    /// List routes, offset-paginated.
    pub async fn list(
        &self,
        params: Option<&ListRoutesParams>,
        opts: &RequestOptions,
    ) -> Result<Page<Route>, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            routes: Vec<Route>,
            #[serde(default)]
            pagination: OffsetPagination,
        }

        let query = params.map(ListRoutesParams::to_query).unwrap_or_default();
        let resp: Envelope = self
            .transport
            .request(Method::GET, "/api/routes", &query, NO_BODY, opts)
            .await?;
        Ok(Page::from_offset(resp.routes, resp.pagination))
    }

    /// Get a route by ID.
    pub async fn get(&self, id: &str, opts: &RequestOptions) -> Result<Route, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            route: Route,
        }

        let resp: Envelope = self
            .transport
            .request(
                Method::GET,
                &format!("/api/routes/{}", id),
                &[],
                NO_BODY,
                opts,
            )
            .await?;
        Ok(resp.route)
    }

    /// Create a route.
    pub async fn create(
        &self,
        params: &CreateRouteParams,
        opts: &RequestOptions,
    ) -> Result<Route, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            route: Route,
        }

        let resp: Envelope = self
            .transport
            .request(Method::POST, "/api/routes", &[], Some(params), opts)
            .await?;
        Ok(resp.route)
    }

    /// Update a route.
    pub async fn update(
        &self,
        id: &str,
        params: &UpdateRouteParams,
        opts: &RequestOptions,
    ) -> Result<(), Error> {
        self.transport
            .request_empty(
                Method::PATCH,
                &format!("/api/routes/{}", id),
                &[],
                Some(params),
                opts,
            )
            .await
    }

    /// Delete a route.
    pub async fn delete(&self, id: &str, opts: &RequestOptions) -> Result<(), Error> {
        self.transport
            .request_empty(
                Method::DELETE,
                &format!("/api/routes/{}", id),
                &[],
                NO_BODY,
                opts,
            )
            .await
    }
}
