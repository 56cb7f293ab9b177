//! Outbound webhook applications.

use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::RequestOptions;
use crate::error::Error;
use crate::pagination::{CursorPage, CursorPagination};
use crate::transport::{Transport, NO_BODY};

/// An outbound webhook application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub organization_id: String,
    /// External identifier supplied at creation time.
    pub uid: String,
    pub metadata: HashMap<String, Value>,
    pub created_at: String,
    pub updated_at: String,
}

/// Parameters for creating an application.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateApplicationParams {
    pub name: String,
    #[serde(rename = "externalId", skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

/// Parameters for updating an application.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateApplicationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

/// Parameters for listing applications.
#[derive(Debug, Clone, Default)]
pub struct ListApplicationsParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub search: Option<String>,
}

impl ListApplicationsParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        query
    }
}

#[derive(Deserialize)]
struct DataEnvelope {
    data: Application,
}

/// Access to application endpoints.
pub struct Applications<'a> {
    pub(crate) transport: &'a Transport,
}

impl Applications<'_> {
    /// List applications, cursor-paginated.
    pub async fn list(
        &self,
        params: Option<&ListApplicationsParams>,
        opts: &RequestOptions,
    ) -> Result<CursorPage<Application>, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            data: Vec<Application>,
            #[serde(default)]
            pagination: CursorPagination,
        }

        let query = params
            .map(ListApplicationsParams::to_query)
            .unwrap_or_default();
        let resp: Envelope = self
            .transport
            .request(
                Method::GET,
                "/api/webhook-applications",
                &query,
                NO_BODY,
                opts,
            )
            .await?;
        Ok(CursorPage::from_cursor(resp.data, resp.pagination))
    }

    /// Get an application by ID.
    pub async fn get(&self, id: &str, opts: &RequestOptions) -> Result<Application, Error> {
        let resp: DataEnvelope = self
            .transport
            .request(
                Method::GET,
                &format!("/api/webhook-applications/{}", id),
                &[],
                NO_BODY,
                opts,
            )
            .await?;
        Ok(resp.data)
    }

    /// Get an application by its external identifier.
    pub async fn get_by_uid(&self, uid: &str, opts: &RequestOptions) -> Result<Application, Error> {
        let resp: DataEnvelope = self
            .transport
            .request(
                Method::GET,
                &format!("/api/webhook-applications/by-external-id/{}", uid),
                &[],
                NO_BODY,
                opts,
            )
            .await?;
        Ok(resp.data)
    }

    /// Create an application.
    pub async fn create(
        &self,
        params: &CreateApplicationParams,
        opts: &RequestOptions,
    ) -> Result<Application, Error> {
        let resp: DataEnvelope = self
            .transport
            .request(
                Method::POST,
                "/api/webhook-applications",
                &[],
                Some(params),
                opts,
            )
            .await?;
        Ok(resp.data)
    }

    /// Update an application.
    pub async fn update(
        &self,
        id: &str,
        params: &UpdateApplicationParams,
        opts: &RequestOptions,
    ) -> Result<Application, Error> {
        let resp: DataEnvelope = self
            .transport
            .request(
                Method::PATCH,
                &format!("/api/webhook-applications/{}", id),
                &[],
                Some(params),
                opts,
            )
            .await?;
        Ok(resp.data)
    }

    /// Delete an application and everything attached to it.
    pub async fn delete(&self, id: &str, opts: &RequestOptions) -> Result<(), Error> {
        self.transport
            .request_empty(
                Method::DELETE,
                &format!("/api/webhook-applications/{}", id),
                &[],
                NO_BODY,
                opts,
            )
            .await
    }

    /// Get or create an application keyed by its external identifier.
    pub async fn get_or_create(
        &self,
        uid: &str,
        params: &CreateApplicationParams,
        opts: &RequestOptions,
    ) -> Result<Application, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            name: &'a str,
            #[serde(rename = "externalId")]
            external_id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            metadata: Option<&'a HashMap<String, Value>>,
        }

        let body = Body {
            name: &params.name,
            external_id: uid,
            metadata: params.metadata.as_ref(),
        };
        let resp: DataEnvelope = self
            .transport
            .request(
                Method::PUT,
                "/api/webhook-applications/upsert",
                &[],
                Some(&body),
                opts,
            )
            .await?;
        Ok(resp.data)
    }
}
