//! Webhook delivery destinations.

use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::RequestOptions;
use crate::error::Error;
use crate::pagination::{OffsetPagination, Page};
use crate::transport::{Transport, NO_BODY};

/// HTTP method used to deliver to a destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
    Patch,
    Delete,
}

/// Authentication scheme applied to deliveries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    #[default]
    None,
    Basic,
    Bearer,
    ApiKey,
    CustomHeader,
}

/// A webhook delivery destination.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Destination {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub url: String,
    pub method: HttpMethod,
    #[serde(with = "super::embedded_json")]
    pub headers: HashMap<String, String>,
    pub auth_type: AuthType,
    #[serde(with = "super::embedded_json")]
    pub auth_config: HashMap<String, Value>,
    pub timeout: i64,
    pub retry_count: i64,
    pub retry_interval: i64,
    pub rate_limit: Option<i64>,
    pub rate_limit_window: Option<i64>,
    #[serde(with = "super::flex_bool")]
    pub is_active: bool,
    pub delivery_count: i64,
    pub last_delivery_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Parameters for creating a destination.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDestinationParams {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_config: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_window: Option<i64>,
}

/// Parameters for updating a destination.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDestinationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_config: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_window: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Parameters for listing destinations.
#[derive(Debug, Clone, Default)]
pub struct ListDestinationsParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

impl ListDestinationsParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            query.push(("pageSize", page_size.to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(is_active) = self.is_active {
            query.push(("isActive", is_active.to_string()));
        }
        query
    }
}

/// Result of sending a test request to a destination.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DestinationTestResult {
    pub success: bool,
    pub status_code: i64,
    pub duration: i64,
    pub response_body: String,
}

/// Access to destination endpoints.
pub struct Destinations<'a> {
    pub(crate) transport: &'a Transport,
}

impl Destinations<'_> {
    /// List destinations, offset-paginated.
    pub async fn list(
        &self,
        params: Option<&ListDestinationsParams>,
        opts: &RequestOptions,
    ) -> Result<Page<Destination>, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            destinations: Vec<Destination>,
            #[serde(default)]
            pagination: OffsetPagination,
        }

        let query = params
            .map(ListDestinationsParams::to_query)
            .unwrap_or_default();
        let resp: Envelope = self
            .transport
            .request(Method::GET, "/api/destinations", &query, NO_BODY, opts)
            .await?;
        Ok(Page::from_offset(resp.destinations, resp.pagination))
    }

    /// Get a destination by ID.
    pub async fn get(&self, id: &str, opts: &RequestOptions) -> Result<Destination, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            destination: Destination,
        }

        let resp: Envelope = self
            .transport
            .request(
                Method::GET,
                &format!("/api/destinations/{}", id),
                &[],
                NO_BODY,
                opts,
            )
            .await?;
        Ok(resp.destination)
    }

    /// Create a destination.
    pub async fn create(
        &self,
        params: &CreateDestinationParams,
        opts: &RequestOptions,
    ) -> Result<Destination, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            destination: Destination,
        }

        let resp: Envelope = self
            .transport
            .request(Method::POST, "/api/destinations", &[], Some(params), opts)
            .await?;
        Ok(resp.destination)
    }

    /// Update a destination.
    pub async fn update(
        &self,
        id: &str,
        params: &UpdateDestinationParams,
        opts: &RequestOptions,
    ) -> Result<(), Error> {
        self.transport
            .request_empty(
                Method::PATCH,
                &format!("/api/destinations/{}", id),
                &[],
                Some(params),
                opts,
            )
            .await
    }

    /// Delete a destination.
    pub async fn delete(&self, id: &str, opts: &RequestOptions) -> Result<(), Error> {
        self.transport
            .request_empty(
                Method::DELETE,
                &format!("/api/destinations/{}", id),
                &[],
                NO_BODY,
                opts,
            )
            .await
    }

    /// Send a test request to a destination.
    pub async fn test(
        &self,
        id: &str,
        opts: &RequestOptions,
    ) -> Result<DestinationTestResult, Error> {
        self.transport
            .request(
                Method::POST,
                &format!("/api/destinations/{}/test", id),
                &[],
                NO_BODY,
                opts,
            )
            .await
    }
}
