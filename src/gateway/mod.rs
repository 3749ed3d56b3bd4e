// AI Concierge Gateway.
//
// Mediates between the website UI and the generative backend: attaches the
// brand persona, invokes the remote endpoint once (no retries), and shapes
// the result for display. The chat and review paths never surface an error
// to the caller; a blank chat reply degrades to a fallback sentence, while
// the visual path propagates failures because a blank image has no sensible
// inline substitute.

pub mod client;
pub mod prompt;
pub mod response;

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::{Config, GatewayConfig, StudioConfig};
use crate::protocol::{
    ConsultationReply, ConsultationRequest, ReviewQuery, ReviewSummary, VisualAsset,
};

use client::{
    Content, GeminiClient, GenerateRequest, GenerationConfig, ImageConfig, Tool, ToolConfig,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to generative endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generative endpoint returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("endpoint returned no usable payload: {0}")]
    EmptyResult(&'static str),

    #[error("concierge gateway is not configured (no API key)")]
    NotConfigured,
}

// ---------------------------------------------------------------------------
// Fallback copy
// ---------------------------------------------------------------------------

/// Returned when the endpoint succeeds but the reply text is empty.
pub const EMPTY_REPLY_FALLBACK: &str =
    "I apologize, but I am momentarily unable to assist. How else may I curate your experience?";

/// Returned when the chat request fails in transit or at the endpoint.
pub const TRANSPORT_FALLBACK: &str =
    "Our concierge service is currently undergoing refinement. Please use our inquiry form for immediate assistance.";

/// Returned when the verified-reviews lookup fails or comes back empty.
pub const REVIEWS_FALLBACK: &str =
    "Our couples' verified reviews are temporarily unavailable. Please explore our films, or reach out through the inquiry form.";

// ---------------------------------------------------------------------------
// ConciergeGateway
// ---------------------------------------------------------------------------

/// High-level gateway that is either backed by a live client or disabled
/// (no API key configured). Disabled gateways keep the same fail-soft
/// contract: chat and reviews return their fallbacks, visuals error.
pub enum ConciergeGateway {
    Active(ActiveGateway),
    Disabled,
}

pub struct ActiveGateway {
    client: GeminiClient,
    settings: GatewayConfig,
    studio: StudioConfig,
}

impl ConciergeGateway {
    /// Build a gateway from the application config.
    ///
    /// Returns `Active` if an API key is present in credentials, otherwise
    /// returns `Disabled`.
    pub fn from_config(config: &Config) -> Self {
        match &config.credentials.gemini_api_key {
            Some(key) if !key.is_empty() => ConciergeGateway::Active(ActiveGateway {
                client: GeminiClient::new(key.clone(), config.gateway.endpoint.clone()),
                settings: config.gateway.clone(),
                studio: config.studio.clone(),
            }),
            _ => ConciergeGateway::Disabled,
        }
    }

    /// Answer a chat message in the brand voice. Never fails: transport and
    /// endpoint problems are logged and replaced with a fallback sentence,
    /// so the returned text is always non-empty.
    pub async fn consultation_reply(&self, request: &ConsultationRequest) -> ConsultationReply {
        let gateway = match self {
            ConciergeGateway::Active(gateway) => gateway,
            ConciergeGateway::Disabled => {
                warn!("consultation requested but gateway is disabled");
                return ConsultationReply {
                    text: TRANSPORT_FALLBACK.to_string(),
                };
            }
        };

        let message = request.message.trim();
        if message.is_empty() {
            debug!("blank consultation message, skipping upstream call");
            return ConsultationReply {
                text: EMPTY_REPLY_FALLBACK.to_string(),
            };
        }

        let mut wire = GenerateRequest::user_text(message);
        wire.system_instruction = Some(Content::instruction(prompt::system_persona(
            &gateway.studio.name,
        )));
        wire.generation_config = Some(GenerationConfig {
            temperature: Some(gateway.settings.temperature),
            top_p: Some(gateway.settings.top_p),
            image_config: None,
        });

        match gateway.client.generate(&gateway.settings.text_model, &wire).await {
            Ok(resp) => match response::candidate_text(&resp) {
                Some(text) => ConsultationReply { text },
                None => {
                    warn!("consultation reply came back empty");
                    ConsultationReply {
                        text: EMPTY_REPLY_FALLBACK.to_string(),
                    }
                }
            },
            Err(err) => {
                error!(%err, "consultation request failed");
                ConsultationReply {
                    text: TRANSPORT_FALLBACK.to_string(),
                }
            }
        }
    }

    /// Generate an editorial wedding visual for a theme and return it as a
    /// base64 data URI. Unlike the text paths this one propagates failures;
    /// callers must handle the error explicitly (e.g. show a retry prompt).
    pub async fn generate_visual(&self, theme: &str) -> Result<VisualAsset, GatewayError> {
        let gateway = match self {
            ConciergeGateway::Active(gateway) => gateway,
            ConciergeGateway::Disabled => return Err(GatewayError::NotConfigured),
        };

        let theme = theme.trim();
        if theme.is_empty() {
            return Err(GatewayError::EmptyResult("blank visual theme"));
        }

        let mut wire = GenerateRequest::user_text(&prompt::build_visual_prompt(theme));
        wire.generation_config = Some(GenerationConfig {
            temperature: None,
            top_p: None,
            image_config: Some(ImageConfig {
                aspect_ratio: gateway.settings.aspect_ratio.clone(),
            }),
        });

        let resp = gateway
            .client
            .generate(&gateway.settings.image_model, &wire)
            .await
            .map_err(|err| {
                error!(%err, "visual generation request failed");
                err
            })?;

        let image = response::first_inline_image(&resp)
            .ok_or(GatewayError::EmptyResult("no inline image part in response"))?;

        Ok(VisualAsset {
            data_uri: format!("data:image/png;base64,{}", image.data),
        })
    }

    /// Look up verified reviews through the maps-grounded search tool.
    /// Never fails: any problem yields the fixed fallback summary with an
    /// empty link list. The summary text is always non-empty.
    pub async fn verified_reviews(&self, query: &ReviewQuery) -> ReviewSummary {
        let gateway = match self {
            ConciergeGateway::Active(gateway) => gateway,
            ConciergeGateway::Disabled => {
                warn!("reviews requested but gateway is disabled");
                return fallback_reviews();
            }
        };

        let business_name = query.business_name.trim();
        if business_name.is_empty() {
            warn!("blank business name in reviews query");
            return fallback_reviews();
        }

        let mut wire = GenerateRequest::user_text(&prompt::build_reviews_query(business_name));
        wire.tools = vec![Tool::google_maps()];
        // Explicit coordinates win; the configured studio location is the
        // bias for plain lookups.
        let coordinates = query.coordinates.or(gateway.studio.location);
        wire.tool_config = coordinates.map(|c| ToolConfig::lat_lng(c.lat, c.lng));

        match gateway.client.generate(&gateway.settings.text_model, &wire).await {
            Ok(resp) => {
                let links = response::maps_links(&resp);
                let text = response::candidate_text(&resp)
                    .unwrap_or_else(|| REVIEWS_FALLBACK.to_string());
                ReviewSummary { text, links }
            }
            Err(err) => {
                warn!(%err, "verified reviews lookup failed");
                fallback_reviews()
            }
        }
    }
}

fn fallback_reviews() -> ReviewSummary {
    ReviewSummary {
        text: REVIEWS_FALLBACK.to_string(),
        links: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CredentialsConfig;
    use crate::protocol::Coordinates;

    fn make_test_config(api_key: Option<String>) -> Config {
        Config {
            studio: StudioConfig {
                name: "Weddings by Githui".into(),
                business_name: None,
                location: Some(Coordinates {
                    lat: -1.2921,
                    lng: 36.8219,
                }),
            },
            gateway: GatewayConfig {
                endpoint: "http://127.0.0.1:9".into(),
                text_model: "gemini-3-flash-preview".into(),
                image_model: "gemini-2.5-flash-image".into(),
                temperature: 0.7,
                top_p: 0.9,
                aspect_ratio: "16:9".into(),
            },
            credentials: CredentialsConfig {
                gemini_api_key: api_key,
            },
        }
    }

    // -- from_config --

    #[test]
    fn from_config_with_api_key_returns_active() {
        let config = make_test_config(Some("test-key".to_string()));
        let gateway = ConciergeGateway::from_config(&config);
        assert!(matches!(gateway, ConciergeGateway::Active(_)));
    }

    #[test]
    fn from_config_without_api_key_returns_disabled() {
        let config = make_test_config(None);
        let gateway = ConciergeGateway::from_config(&config);
        assert!(matches!(gateway, ConciergeGateway::Disabled));
    }

    #[test]
    fn from_config_with_empty_api_key_returns_disabled() {
        let config = make_test_config(Some(String::new()));
        let gateway = ConciergeGateway::from_config(&config);
        assert!(matches!(gateway, ConciergeGateway::Disabled));
    }

    // -- Disabled gateway contract --

    #[tokio::test]
    async fn disabled_gateway_replies_with_transport_fallback() {
        let gateway = ConciergeGateway::Disabled;
        let reply = gateway
            .consultation_reply(&ConsultationRequest::new("Which package fits us?"))
            .await;
        assert_eq!(reply.text, TRANSPORT_FALLBACK);
    }

    #[tokio::test]
    async fn disabled_gateway_visual_is_not_configured_error() {
        let gateway = ConciergeGateway::Disabled;
        let err = gateway.generate_visual("garden ceremony").await.unwrap_err();
        assert!(matches!(err, GatewayError::NotConfigured));
    }

    #[tokio::test]
    async fn disabled_gateway_reviews_fall_back_with_no_links() {
        let gateway = ConciergeGateway::Disabled;
        let summary = gateway
            .verified_reviews(&ReviewQuery {
                business_name: "Weddings by Githui".into(),
                coordinates: None,
            })
            .await;
        assert_eq!(summary.text, REVIEWS_FALLBACK);
        assert!(summary.links.is_empty());
    }

    // -- Input edge cases that never reach the network --

    #[tokio::test]
    async fn blank_message_short_circuits_to_empty_reply_fallback() {
        let config = make_test_config(Some("test-key".into()));
        let gateway = ConciergeGateway::from_config(&config);
        let reply = gateway
            .consultation_reply(&ConsultationRequest::new("   "))
            .await;
        assert_eq!(reply.text, EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn blank_theme_is_an_empty_result_error() {
        let config = make_test_config(Some("test-key".into()));
        let gateway = ConciergeGateway::from_config(&config);
        let err = gateway.generate_visual("  ").await.unwrap_err();
        assert!(matches!(err, GatewayError::EmptyResult(_)));
    }

    #[tokio::test]
    async fn blank_business_name_falls_back_without_network() {
        let config = make_test_config(Some("test-key".into()));
        let gateway = ConciergeGateway::from_config(&config);
        let summary = gateway
            .verified_reviews(&ReviewQuery {
                business_name: String::new(),
                coordinates: None,
            })
            .await;
        assert_eq!(summary.text, REVIEWS_FALLBACK);
        assert!(summary.links.is_empty());
    }
}
