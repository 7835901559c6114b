//! Fulfillment payload assembly.

use crate::{
    models::{
        ContextParameters, GooglePayload, OutputContext, Payload, PermissionValueSpec,
        RichResponse, RichResponseItem, SimpleResponse, Suggestion, SystemIntent, WebhookResponse,
    },
    services::{
        date::DateBucket,
        intent::{CONTEXT_RAINING, CONTEXT_WEATHER, EffectiveIntent},
    },
};

/// Lifespan given to the context of the topic just answered
pub const ACTIVE_CONTEXT_LIFESPAN: u32 = 5;

pub const PERMISSION_INTENT: &str = "actions.intent.PERMISSION";
const PERMISSION_VALUE_SPEC_TYPE: &str =
    "type.googleapis.com/google.actions.v2.PermissionValueSpec";
const DEVICE_PRECISE_LOCATION: &str = "DEVICE_PRECISE_LOCATION";

/// Conversation topic, one per output context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Weather,
    Raining,
}

impl Topic {
    pub fn from_intent(intent: EffectiveIntent) -> Option<Self> {
        match intent {
            EffectiveIntent::GetWeather => Some(Topic::Weather),
            EffectiveIntent::IsRaining => Some(Topic::Raining),
            EffectiveIntent::Unknown => None,
        }
    }

    fn context_name(&self) -> &'static str {
        match self {
            Topic::Weather => CONTEXT_WEATHER,
            Topic::Raining => CONTEXT_RAINING,
        }
    }

    /// Suggestion chip that switches to the other topic
    fn sibling_chip(&self) -> &'static str {
        match self {
            Topic::Weather => "rain",
            Topic::Raining => "weather",
        }
    }

    fn permission_reason(&self) -> &'static str {
        match self {
            Topic::Weather => "To get the weather near you",
            Topic::Raining => "To check if it is raining near you",
        }
    }
}

/// Identifies the session whose contexts are written
#[derive(Debug, Clone, Copy)]
pub struct SessionRef<'a> {
    pub project_id: &'a str,
    pub session_id: &'a str,
}

impl SessionRef<'_> {
    fn context_path(&self, context: &str) -> String {
        format!(
            "projects/{}/agent/sessions/{}/contexts/{}",
            self.project_id, self.session_id, context
        )
    }
}

/// Spoken answer with suggestion chips and refreshed contexts
pub fn answer_response(
    text: &str,
    topic: Topic,
    answered: DateBucket,
    session: SessionRef<'_>,
) -> WebhookResponse {
    WebhookResponse {
        fulfillment_text: text.to_string(),
        payload: Some(Payload {
            google: GooglePayload {
                rich_response: Some(RichResponse {
                    items: vec![RichResponseItem {
                        simple_response: SimpleResponse {
                            text_to_speech: text.to_string(),
                            display_text: text.to_string(),
                        },
                    }],
                    suggestions: suggestions(topic, answered),
                }),
                ..GooglePayload::default()
            },
        }),
        output_contexts: Some(output_contexts(topic, session)),
    }
}

/// Ask the user to share the device's precise location
pub fn permission_response(topic: Topic, session: SessionRef<'_>) -> WebhookResponse {
    let reason = topic.permission_reason();
    WebhookResponse {
        fulfillment_text: reason.to_string(),
        payload: Some(Payload {
            google: GooglePayload {
                expect_user_response: Some(true),
                system_intent: Some(SystemIntent {
                    intent: PERMISSION_INTENT.to_string(),
                    data: PermissionValueSpec {
                        type_url: PERMISSION_VALUE_SPEC_TYPE.to_string(),
                        opt_context: reason.to_string(),
                        permissions: vec![DEVICE_PRECISE_LOCATION.to_string()],
                    },
                }),
                ..GooglePayload::default()
            },
        }),
        output_contexts: Some(output_contexts(topic, session)),
    }
}

/// Every other spoken date, then the sibling topic
pub fn suggestions(topic: Topic, answered: DateBucket) -> Vec<Suggestion> {
    DateBucket::SPOKEN
        .into_iter()
        .filter(|bucket| *bucket != answered)
        .filter_map(|bucket| bucket.label())
        .chain(std::iter::once(topic.sibling_chip()))
        .map(|title| Suggestion {
            title: title.to_string(),
        })
        .collect()
}

/// Both topic contexts: the answered one stays alive, the other expires
pub fn output_contexts(topic: Topic, session: SessionRef<'_>) -> Vec<OutputContext> {
    [Topic::Weather, Topic::Raining]
        .into_iter()
        .map(|t| OutputContext {
            name: session.context_path(t.context_name()),
            lifespan_count: if t == topic { ACTIVE_CONTEXT_LIFESPAN } else { 0 },
            parameters: ContextParameters::default(),
        })
        .collect()
}
