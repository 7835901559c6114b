//! Effective intent resolution.
//!
//! Dialogflow reports the intent that matched the user's last utterance. For
//! follow-up turns that intent says nothing about the topic, so the topic is
//! recovered from the contexts left behind by the previous answer.

use crate::config::WebhookFeatures;
use std::fmt;

pub const INTENT_GET_WEATHER: &str = "GetWeather";
pub const INTENT_IS_RAINING: &str = "IsRaining";
pub const INTENT_WEATHER_CONTEXT: &str = "WeatherContext";
pub const INTENT_RAINING_CONTEXT: &str = "RainingContext";
pub const INTENT_REQUEST_LOCATION: &str = "RequestLocation";

/// Topic context names, shared with the contexts the webhook emits
pub const CONTEXT_WEATHER: &str = "weather";
pub const CONTEXT_RAINING: &str = "raining";

/// The question the webhook is actually answering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveIntent {
    GetWeather,
    IsRaining,
    Unknown,
}

impl EffectiveIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveIntent::GetWeather => "get_weather",
            EffectiveIntent::IsRaining => "is_raining",
            EffectiveIntent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EffectiveIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the raw intent name, following one level of context indirection
/// for the location follow-up.
pub fn resolve_intent<S: AsRef<str>>(
    raw_intent_name: &str,
    output_contexts: &[S],
    features: &WebhookFeatures,
) -> EffectiveIntent {
    match raw_intent_name {
        INTENT_GET_WEATHER => EffectiveIntent::GetWeather,
        INTENT_IS_RAINING => EffectiveIntent::IsRaining,
        INTENT_WEATHER_CONTEXT if features.context_followups => EffectiveIntent::GetWeather,
        INTENT_RAINING_CONTEXT if features.context_followups => EffectiveIntent::IsRaining,
        INTENT_REQUEST_LOCATION if features.location_permission => {
            intent_from_contexts(output_contexts)
        }
        _ => EffectiveIntent::Unknown,
    }
}

/// First topic context wins. Context names may be full resource paths.
fn intent_from_contexts<S: AsRef<str>>(output_contexts: &[S]) -> EffectiveIntent {
    output_contexts
        .iter()
        .find_map(|name| match context_short_name(name.as_ref()) {
            CONTEXT_WEATHER => Some(EffectiveIntent::GetWeather),
            CONTEXT_RAINING => Some(EffectiveIntent::IsRaining),
            _ => None,
        })
        .unwrap_or(EffectiveIntent::Unknown)
}

fn context_short_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}
