//! Dialogflow v2 fulfillment envelope.
//!
//! Only the fields the webhook reads are modelled; everything else the
//! platform sends is ignored during deserialization.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Incoming fulfillment request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    /// Full session path, e.g. `projects/p/agent/sessions/abc`
    #[serde(default)]
    pub session: String,
    #[serde(default)]
    pub query_result: QueryResult,
    pub original_detect_intent_request: Option<OriginalDetectIntentRequest>,
}

impl WebhookRequest {
    /// Last segment of the session path
    pub fn session_id(&self) -> &str {
        self.session.rsplit('/').next().unwrap_or_default()
    }

    pub fn intent_name(&self) -> &str {
        &self.query_result.intent.display_name
    }

    /// Names of the contexts active on the previous turn, in request order
    pub fn context_names(&self) -> Vec<&str> {
        self.query_result
            .output_contexts
            .iter()
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Device coordinates granted through the permission flow, if any
    pub fn device_coordinates(&self) -> Option<Coordinates> {
        self.original_detect_intent_request
            .as_ref()?
            .payload
            .as_ref()?
            .device
            .as_ref()?
            .location
            .as_ref()?
            .coordinates
    }

    /// Whether the turn came from a surface that can share device location
    pub fn supports_device_location(&self) -> bool {
        self.original_detect_intent_request
            .as_ref()
            .and_then(|r| r.source.as_deref())
            .is_some_and(|source| source == "google")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub intent: Intent,
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(default)]
    pub output_contexts: Vec<RequestContext>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    #[serde(default)]
    pub display_name: String,
}

/// Slots extracted by the agent. Dialogflow sends empty strings for unfilled slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct Parameters {
    pub area: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub name: String,
    pub lifespan_count: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct OriginalDetectIntentRequest {
    pub source: Option<String>,
    pub payload: Option<DevicePayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct DevicePayload {
    pub device: Option<Device>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct Device {
    pub location: Option<DeviceLocation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct DeviceLocation {
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Outgoing fulfillment response
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub fulfillment_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_contexts: Option<Vec<OutputContext>>,
}

impl WebhookResponse {
    /// Response carrying nothing but the spoken text
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: text.into(),
            payload: None,
            output_contexts: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct Payload {
    pub google: GooglePayload,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct GooglePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expect_user_response: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rich_response: Option<RichResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_intent: Option<SystemIntent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct RichResponse {
    pub items: Vec<RichResponseItem>,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct RichResponseItem {
    pub simple_response: SimpleResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponse {
    pub text_to_speech: String,
    pub display_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct Suggestion {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct SystemIntent {
    pub intent: String,
    pub data: PermissionValueSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionValueSpec {
    #[serde(rename = "@type")]
    pub type_url: String,
    pub opt_context: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct OutputContext {
    pub name: String,
    pub lifespan_count: u32,
    pub parameters: ContextParameters,
}

/// Contexts are used purely as flags, so they never carry parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct ContextParameters {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_minimal_request() {
        let request: WebhookRequest = serde_json::from_value(json!({
            "session": "projects/sgweather-8b165/agent/sessions/abc-123",
            "queryResult": {
                "intent": { "displayName": "GetWeather" },
                "parameters": { "area": "", "date": "2018-05-11T12:00:00+08:00" }
            }
        }))
        .unwrap();

        assert_eq!(request.session_id(), "abc-123");
        assert_eq!(request.intent_name(), "GetWeather");
        assert_eq!(request.query_result.parameters.area.as_deref(), Some(""));
        assert!(request.device_coordinates().is_none());
        assert!(!request.supports_device_location());
    }

    #[test]
    fn test_device_location_extraction() {
        let request: WebhookRequest = serde_json::from_value(json!({
            "session": "projects/p/agent/sessions/s",
            "queryResult": {
                "intent": { "displayName": "RequestLocation" },
                "outputContexts": [
                    { "name": "projects/p/agent/sessions/s/contexts/raining", "lifespanCount": 4 },
                    { "name": "projects/p/agent/sessions/s/contexts/actions_capability_screen_output" }
                ]
            },
            "originalDetectIntentRequest": {
                "source": "google",
                "payload": {
                    "device": {
                        "location": { "coordinates": { "latitude": 1.375, "longitude": 103.839 } }
                    }
                }
            }
        }))
        .unwrap();

        assert!(request.supports_device_location());
        assert_eq!(
            request.device_coordinates(),
            Some(Coordinates {
                latitude: 1.375,
                longitude: 103.839
            })
        );
        assert_eq!(request.context_names().len(), 2);
    }

    #[test]
    fn test_text_only_response_omits_payload() {
        let json = serde_json::to_value(WebhookResponse::text_only("hello")).unwrap();
        assert_eq!(json, json!({ "fulfillmentText": "hello" }));
    }
}
