//! Inbound webhook sources.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::config::RequestOptions;
use crate::error::Error;
use crate::pagination::{OffsetPagination, Page};
use crate::transport::{Transport, NO_BODY};

/// The upstream provider a source accepts webhooks from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceProvider {
    #[default]
    Generic,
    Github,
    Stripe,
    Shopify,
    Slack,
    Twilio,
    Sendgrid,
    Mailgun,
    Paddle,
    Linear,
    Svix,
    Custom,
}

impl SourceProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Github => "github",
            Self::Stripe => "stripe",
            Self::Shopify => "shopify",
            Self::Slack => "slack",
            Self::Twilio => "twilio",
            Self::Sendgrid => "sendgrid",
            Self::Mailgun => "mailgun",
            Self::Paddle => "paddle",
            Self::Linear => "linear",
            Self::Svix => "svix",
            Self::Custom => "custom",
        }
    }
}

/// Deduplication strategy applied to incoming events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupStrategy {
    #[default]
    None,
    Header,
    PayloadHash,
    EventId,
}

/// IP filtering mode for the source's ingest endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpFilterMode {
    #[default]
    None,
    Allowlist,
    Denylist,
}

/// An inbound webhook source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Source {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub provider: SourceProvider,
    #[serde(with = "super::flex_bool")]
    pub is_active: bool,
    pub signing_secret: Option<String>,
    pub ingest_url: Option<String>,
    #[serde(with = "super::flex_bool")]
    pub verify_signature: bool,
    pub dedup_strategy: DedupStrategy,
    pub dedup_window: Option<i64>,
    pub dedup_header_name: Option<String>,
    pub ip_filter_mode: IpFilterMode,
    pub ip_allowlist: Vec<String>,
    pub ip_denylist: Vec<String>,
    pub rate_limit: Option<i64>,
    pub rate_limit_window: Option<i64>,
    /// Payloads are never stored at rest when set.
    #[serde(with = "super::flex_bool")]
    pub transient_mode: bool,
    pub event_count: i64,
    pub last_event_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Parameters for creating a source.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSourceParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<SourceProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_signature: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedup_strategy: Option<DedupStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedup_window: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedup_header_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_filter_mode: Option<IpFilterMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_allowlist: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_denylist: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_window: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transient_mode: Option<bool>,
}

/// Parameters for updating a source.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSourceParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_signature: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedup_strategy: Option<DedupStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedup_window: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedup_header_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_filter_mode: Option<IpFilterMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_allowlist: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_denylist: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_window: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transient_mode: Option<bool>,
}

/// Parameters for listing sources.
#[derive(Debug, Clone, Default)]
pub struct ListSourcesParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub provider: Option<SourceProvider>,
    pub is_active: Option<bool>,
}

impl ListSourcesParams {
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
        if let Some(provider) = self.provider {
            query.push(("provider", provider.as_str().to_string()));
        }
        if let Some(is_active) = self.is_active {
            query.push(("isActive", is_active.to_string()));
        }
        query
    }
}

/// Access to source endpoints.
pub struct Sources<'a> {
    pub(crate) transport: &'a Transport,
}

impl Sources<'_> {
    /// List sources, offset-paginated.
    pub async fn list(
        &self,
        params: Option<&ListSourcesParams>,
        opts: &RequestOptions,
    ) -> Result<Page<Source>, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            sources: Vec<Source>,
            #[serde(default)]
            pagination: OffsetPagination,
        }

        let query = params.map(ListSourcesParams::to_query).unwrap_or_default();
        let resp: Envelope = self
            .transport
            .request(Method::GET, "/api/sources", &query, NO_BODY, opts)
            .await?;
        Ok(Page::from_offset(resp.sources, resp.pagination))
    }

    /// Get a source by ID or slug.
    pub async fn get(&self, id: &str, opts: &RequestOptions) -> Result<Source, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            source: Source,
        }

        let resp: Envelope = self
            .transport
            .request(
                Method::GET,
                &format!("/api/sources/{}", id),
                &[],
                NO_BODY,
                opts,
            )
            .await?;
        Ok(resp.source)
    }

    /// Create a source.
    pub async fn create(
        &self,
        params: &CreateSourceParams,
        opts: &RequestOptions,
    ) -> Result<Source, Error> {
        #[derive(Deserialize)]
        struct Envelope {
            source: Source,
        }

        let resp: Envelope = self
            .transport
            .request(Method::POST, "/api/sources", &[], Some(params), opts)
            .await?;
        Ok(resp.source)
    }

    /// Update a source.
    pub async fn update(
        &self,
        id: &str,
        params: &UpdateSourceParams,
        opts: &RequestOptions,
    ) -> Result<(), Error> {
        self.transport
            .request_empty(
                Method::PATCH,
                &format!("/api/sources/{}", id),
                &[],
                Some(params),
                opts,
            )
            .await
    }

    /// Delete a source.
    pub async fn delete(&self, id: &str, opts: &RequestOptions) -> Result<(), Error> {
        self.transport
            .request_empty(
                Method::DELETE,
                &format!("/api/sources/{}", id),
                &[],
                NO_BODY,
                opts,
            )
            .await
    }

    /// Rotate the signing secret for a source, returning the new secret.
    pub async fn rotate_secret(&self, id: &str, opts: &RequestOptions) -> Result<String, Error> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Envelope {
            signing_secret: String,
        }

        let resp: Envelope = self
            .transport
            .request(
                Method::POST,
                &format!("/api/sources/{}/rotate-secret", id),
                &[],
                NO_BODY,
                opts,
            )
            .await?;
        Ok(resp.signing_secret)
    }
}

#[cfg(test)]
#[path = "sources_tests.rs"]
mod tests;
