//! Outbound webhook endpoints.

use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::RequestOptions;
use crate::error::Error;
use crate::pagination::{CursorPage, CursorPagination};
use crate::transport::{Transport, NO_BODY};

/// Circuit breaker state of an endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointCircuitState {
    #[default]
    Closed,
    Open,
    HalfOpen,
}

/// A custom header sent with every delivery to an endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointHeader {
    pub name: String,
    pub value: String,
}

/// An outbound webhook endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Endpoint {
    pub id: String,
    pub application_id: String,
    pub url: String,
    pub description: Option<String>,
    pub secret: String,
    #[serde(with = "super::flex_bool")]
    pub is_disabled: bool,
    pub circuit_state: EndpointCircuitState,
    pub circuit_opened_at: Option<String>,
    pub filter_types: Vec<String>,
    pub rate_limit: Option<i64>,
    pub rate_limit_period: Option<i64>,
    pub headers: Vec<EndpointHeader>,
    pub metadata: HashMap<String, Value>,
    pub total_messages: i64,
    pub total_successes: i64,
    pub total_failures: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Parameters for creating an endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEndpointParams {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

/// Parameters for updating an endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEndpointParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

/// Parameters for listing endpoints.
#[derive(Debug, Clone, Default)]
pub struct ListEndpointsParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub is_disabled: Option<bool>,
}

impl ListEndpointsParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        if let Some(is_disabled) = self.is_disabled {
            query.push(("isDisabled", is_disabled.to_string()));
        }
        query
    }
}

#[derive(Deserialize)]
struct DataEnvelope {
    data: Endpoint,
}

/// Access to endpoint endpoints.
pub struct Endpoints<'a> {
    pub(crate) transport: &'a Transport,
}

impl Endpoints<'_> {
    /// List an application's endpoints, cursor-paginated.
    pub async fn list(
        &self,
        application_id: &str,
        params: Option<&ListEndpointsParams>,
        opts: &RequestOptions,
    ) -> Result<CursorPage<Endpoint>, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            data: Vec<Endpoint>,
            #[serde(default)]
            pagination: CursorPagination,
        }

        let mut query = vec![("applicationId", application_id.to_string())];
        if let Some(params) = params {
            query.extend(params.to_query());
        }
        let resp: Envelope = self
            .transport
            .request(Method::GET, "/api/webhook-endpoints", &query, NO_BODY, opts)
            .await?;
        Ok(CursorPage::from_cursor(resp.data, resp.pagination))
    }

    /// Get an endpoint by ID.
    pub async fn get(&self, id: &str, opts: &RequestOptions) -> Result<Endpoint, Error> {
        let resp: DataEnvelope = self
            .transport
            .request(
                Method::GET,
                &format!("/api/webhook-endpoints/{}", id),
                &[],
                NO_BODY,
                opts,
            )
            .await?;
        Ok(resp.data)
    }

    /// Create an endpoint under an application.
    pub async fn create(
        &self,
        application_id: &str,
        params: &CreateEndpointParams,
        opts: &RequestOptions,
    ) -> Result<Endpoint, Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            application_id: &'a str,
            #[serde(flatten)]
            params: &'a CreateEndpointParams,
        }

        let body = Body {
            application_id,
            params,
        };
        let resp: DataEnvelope = self
            .transport
            .request(
                Method::POST,
                "/api/webhook-endpoints",
                &[],
                Some(&body),
                opts,
            )
            .await?;
        Ok(resp.data)
    }

    /// Update an endpoint.
    pub async fn update(
        &self,
        id: &str,
        params: &UpdateEndpointParams,
        opts: &RequestOptions,
    ) -> Result<Endpoint, Error> {
        let resp: DataEnvelope = self
            .transport
            .request(
                Method::PATCH,
                &format!("/api/webhook-endpoints/{}", id),
                &[],
                Some(params),
                opts,
            )
            .await?;
        Ok(resp.data)
    }

    /// Delete an endpoint.
    pub async fn delete(&self, id: &str, opts: &RequestOptions) -> Result<(), Error> {
        self.transport
            .request_empty(
                Method::DELETE,
                &format!("/api/webhook-endpoints/{}", id),
                &[],
                NO_BODY,
                opts,
            )
            .await
    }

    /// Re-enable a disabled endpoint.
    pub async fn enable(&self, id: &str, opts: &RequestOptions) -> Result<Endpoint, Error> {
        let params = UpdateEndpointParams {
            is_disabled: Some(false),
            ..Default::default()
        };
        self.update(id, &params, opts).await
    }

    /// Disable an endpoint without deleting it.
    pub async fn disable(&self, id: &str, opts: &RequestOptions) -> Result<Endpoint, Error> {
        let params = UpdateEndpointParams {
            is_disabled: Some(true),
            ..Default::default()
        };
        self.update(id, &params, opts).await
    }

    /// Rotate an endpoint's signing secret, returning the new secret.
    pub async fn rotate_secret(&self, id: &str, opts: &RequestOptions) -> Result<String, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            secret: String,
        }

        let resp: Envelope = self
            .transport
            .request(
                Method::POST,
                &format!("/api/webhook-endpoints/{}/rotate-secret", id),
                &[],
                NO_BODY,
                opts,
            )
            .await?;
        Ok(resp.secret)
    }

    /// Reset an endpoint's circuit breaker, then fetch its fresh state.
    pub async fn recover_circuit(
        &self,
        id: &str,
        opts: &RequestOptions,
    ) -> Result<Endpoint, Error> {
        self.transport
            .request_empty(
                Method::POST,
                &format!("/api/webhook-endpoints/{}/reset-circuit", id),
                &[],
                NO_BODY,
                opts,
            )
            .await?;
        self.get(id, opts).await
    }
}
