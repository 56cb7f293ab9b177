//! # Hookbase
//!
//! Client for the Hookbase webhook platform API.
//!
//! This crate provides:
//! - A typed async client for sources, destinations, routes, events,
//!   applications, endpoints, and outbound messages
//! - Automatic retries with exponential backoff and `Retry-After` handling
//! - A closed error taxonomy mapping every HTTP failure to one variant
//! - Standalone webhook signature verification
//!
//! # Examples
//!
//! ## Calling the API
//!
//! ```rust,no_run
//! use hookbase::{Client, RequestOptions};
//!
//! # async fn run() -> Result<(), hookbase::Error> {
//! let client = Client::new("hb_live_...");
//!
//! let page = client.sources().list(None, &RequestOptions::new()).await?;
//! for source in page.items() {
//!     println!("{} ({})", source.name, source.id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Verifying a webhook delivery
//!
//! ```rust
//! use hookbase::Webhook;
//!
//! let webhook = Webhook::new("whsec_dGVzdC1zZWNyZXQ=");
//!
//! let payload = br#"{"event":"order.created"}"#;
//! let headers = webhook.generate_test_headers(payload, None);
//!
//! assert!(webhook.verify(payload, &headers).is_ok());
//! ```

pub mod config;
pub mod error;
pub mod pagination;
pub mod resources;
pub mod webhook;

mod transport;

pub use config::{ClientConfig, RequestOptions};
pub use error::{ApiErrorDetails, Error, ValidationErrors};
pub use pagination::{CursorPage, Page};
pub use webhook::Webhook;

pub use resources::{
    Application, Applications, Destination, Destinations, Endpoint, Endpoints, EventDetail, Events,
    InboundEvent, Messages, OutboundMessage, Route, Routes, Source, Sources,
};

use transport::Transport;

/// The Hookbase API client.
///
/// Cheap to share by reference; the underlying HTTP client pools
/// connections and all resource accessors borrow the same transport.
#[derive(Debug)]
pub struct Client {
    transport: Transport,
}

impl Client {
    /// Create a client with the default configuration.
    ///
    /// # Panics
    ///
    /// Panics if `api_key` is empty.
    pub fn new(api_key: &str) -> Self {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a client with a custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if `api_key` is empty.
    pub fn with_config(api_key: &str, config: ClientConfig) -> Self {
        assert!(!api_key.is_empty(), "hookbase: API key is required");
        Self {
            transport: Transport::new(api_key.to_string(), &config),
        }
    }

    /// Inbound webhook sources.
    pub fn sources(&self) -> Sources<'_> {
        Sources {
            transport: &self.transport,
        }
    }

    /// Delivery destinations.
    pub fn destinations(&self) -> Destinations<'_> {
        Destinations {
            transport: &self.transport,
        }
    }

    /// Routes connecting sources to destinations.
    pub fn routes(&self) -> Routes<'_> {
        Routes {
            transport: &self.transport,
        }
    }

    /// Received events.
    pub fn events(&self) -> Events<'_> {
        Events {
            transport: &self.transport,
        }
    }

    /// Outbound webhook applications.
    pub fn applications(&self) -> Applications<'_> {
        Applications {
            transport: &self.transport,
        }
    }

    /// Outbound webhook endpoints.
    pub fn endpoints(&self) -> Endpoints<'_> {
        Endpoints {
            transport: &self.transport,
        }
    }

    /// Outbound messages and delivery attempts.
    pub fn messages(&self) -> Messages<'_> {
        Messages {
            transport: &self.transport,
        }
    }
}
