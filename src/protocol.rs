// Data model shared with the UI layer.
//
// Every type here is created for a single request and discarded after render;
// nothing is persisted. The structs serialize to the JSON shapes the website
// front-end consumes.

use serde::{Deserialize, Serialize};

/// A free-text message submitted through the concierge chat widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRequest {
    pub message: String,
}

impl ConsultationRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Reply text returned to the chat widget. Always non-empty: the gateway
/// substitutes a fallback sentence when the upstream payload is unusable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationReply {
    pub text: String,
}

/// A generated image held only in UI state for display.
///
/// `data_uri` is a `data:image/png;base64,...` string ready for an `<img>`
/// src attribute; it is discarded on navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualAsset {
    pub data_uri: String,
}

/// Latitude/longitude used to bias the maps-grounded review search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Lookup parameters for the verified-reviews operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewQuery {
    pub business_name: String,
    pub coordinates: Option<Coordinates>,
}

/// A single citation produced by the maps-grounded search tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewLink {
    pub uri: String,
    pub title: String,
}

/// Review summary returned to the UI: display text plus the maps citations
/// backing it. `text` is never empty; `links` may be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub text: String,
    pub links: Vec<ReviewLink>,
}
