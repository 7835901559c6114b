//! Configuration for the upstream forecast client
//!
//! Provides environment-based configuration for the data.gov.sg client
//! with defaults suitable for production use.

use crate::services::forecast_client::ForecastClientConfig;
use std::env;

impl ForecastClientConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = env::var("FORECAST_API_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let user_agent = env::var("FORECAST_USER_AGENT").unwrap_or(defaults.user_agent);

        let request_timeout_seconds = env::var("FORECAST_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.request_timeout_seconds);

        let connect_timeout_seconds = env::var("FORECAST_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.connect_timeout_seconds);

        let enable_detailed_logging = env::var("FORECAST_DETAILED_LOGGING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.enable_detailed_logging);

        Self {
            base_url,
            user_agent,
            request_timeout_seconds,
            connect_timeout_seconds,
            enable_detailed_logging,
        }
    }
}
