//! Resource facades.
//!
//! Each submodule is a thin typed wrapper over one group of API endpoints:
//! request/response shapes plus one method per operation, all funneled
//! through the shared transport. No logic lives here beyond translating
//! wire envelopes into the crate's public types.

pub mod applications;
pub mod destinations;
pub mod endpoints;
pub mod events;
pub mod messages;
pub mod routes;
pub mod sources;

pub use applications::{
    Application, Applications, CreateApplicationParams, ListApplicationsParams,
    UpdateApplicationParams,
};
pub use destinations::{
    AuthType, CreateDestinationParams, Destination, DestinationTestResult, Destinations,
    HttpMethod, ListDestinationsParams, UpdateDestinationParams,
};
pub use endpoints::{
    CreateEndpointParams, Endpoint, EndpointCircuitState, EndpointHeader, Endpoints,
    ListEndpointsParams, UpdateEndpointParams,
};
pub use events::{
    DeliveryStats, EventDeliveryInfo, EventDetail, Events, InboundEvent, InboundEventStatus,
    ListEventsParams,
};
pub use messages::{
    ListOutboundMessagesParams, MessageAttempt, MessageStatus, Messages, OutboundMessage,
    QueuedMessage, SendMessageParams, SendMessageResponse,
};
pub use routes::{
    CircuitState, CreateRouteParams, FilterCondition, ListRoutesParams, Route, Routes,
    UpdateRouteParams,
};
pub use sources::{
    CreateSourceParams, DedupStrategy, IpFilterMode, ListSourcesParams, Source, SourceProvider,
    Sources, UpdateSourceParams,
};

/// Booleans that may arrive as JSON integers (0/1) from the API's storage
/// layer.
pub(crate) mod flex_bool {
    use serde::Deserialize;

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Bool(b) => b,
            serde_json::Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            _ => false,
        })
    }
}

/// Fields stored as JSON strings upstream, returned either as a raw JSON
/// string or as the parsed value. Unparsable input yields the default.
pub(crate) mod embedded_json {
    use serde::Deserialize;

    pub(crate) fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: serde::Deserializer<'de>,
        T: serde::de::DeserializeOwned + Default,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if let serde_json::Value::String(s) = &value {
            return Ok(serde_json::from_str(s).unwrap_or_default());
        }
        Ok(serde_json::from_value(value).unwrap_or_default())
    }
}
