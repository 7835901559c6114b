//! Webhook behaviour configuration.
//!
//! The fulfillment logic grew through four versions. Rather than keeping
//! four handlers, each version is a set of feature flags over the same code.

use std::env;

/// Latest webhook version, used when `WEBHOOK_VERSION` is unset or invalid
pub const LATEST_WEBHOOK_VERSION: u8 = 4;

/// Dialogflow project that owns the output contexts we emit
pub const DEFAULT_PROJECT_ID: &str = "sgweather-8b165";

/// Optional behaviours layered on top of the plain weather/rain answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebhookFeatures {
    /// Accept the `WeatherContext`/`RainingContext` follow-up intents
    pub context_followups: bool,
    /// Ask for device location and resolve the `RequestLocation` follow-up
    pub location_permission: bool,
    /// Map granted device coordinates to the nearest subzone
    pub nearest_subzone: bool,
}

impl WebhookFeatures {
    /// Feature set of a given webhook version.
    ///
    /// Versions are cumulative: 1 answers single turns only, 2 adds context
    /// follow-ups, 3 adds the location permission request and 4 adds
    /// nearest-subzone resolution. Anything above 4 behaves like 4.
    pub fn for_version(version: u8) -> Self {
        Self {
            context_followups: version >= 2,
            location_permission: version >= 3,
            nearest_subzone: version >= 4,
        }
    }
}

impl Default for WebhookFeatures {
    fn default() -> Self {
        Self::for_version(LATEST_WEBHOOK_VERSION)
    }
}

/// Configuration for the fulfillment webhook
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub version: u8,
    pub features: WebhookFeatures,
    pub project_id: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            version: LATEST_WEBHOOK_VERSION,
            features: WebhookFeatures::default(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
        }
    }
}

impl WebhookConfig {
    /// Configuration for a specific webhook version with the default project
    pub fn for_version(version: u8) -> Self {
        Self {
            version,
            features: WebhookFeatures::for_version(version),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables, falling back to defaults
    ///
    /// `WEBHOOK_VERSION` picks the base feature set; each
    /// `WEBHOOK_<FEATURE>` variable can then switch a single flag.
    pub fn from_env() -> Self {
        let version = env::var("WEBHOOK_VERSION")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v| *v >= 1)
            .unwrap_or(LATEST_WEBHOOK_VERSION);

        let base = WebhookFeatures::for_version(version);
        let features = WebhookFeatures {
            context_followups: flag_from_env("WEBHOOK_CONTEXT_FOLLOWUPS")
                .unwrap_or(base.context_followups),
            location_permission: flag_from_env("WEBHOOK_LOCATION_PERMISSION")
                .unwrap_or(base.location_permission),
            nearest_subzone: flag_from_env("WEBHOOK_NEAREST_SUBZONE")
                .unwrap_or(base.nearest_subzone),
        };

        let project_id =
            env::var("DIALOGFLOW_PROJECT_ID").unwrap_or_else(|_| DEFAULT_PROJECT_ID.to_string());

        Self {
            version,
            features,
            project_id,
        }
    }
}

fn flag_from_env(key: &str) -> Option<bool> {
    env::var(key).ok().map(|v| v.to_lowercase() == "true")
}
