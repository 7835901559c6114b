//! Environment-driven configuration loading.
//!
//! Each test owns a disjoint set of variables so they can run in parallel.

use sgweather_webhook::{ForecastClientConfig, ServerConfig, WebhookConfig};

#[test]
fn test_webhook_config_from_env() {
    unsafe {
        std::env::remove_var("WEBHOOK_VERSION");
        std::env::remove_var("WEBHOOK_CONTEXT_FOLLOWUPS");
        std::env::remove_var("WEBHOOK_LOCATION_PERMISSION");
        std::env::remove_var("WEBHOOK_NEAREST_SUBZONE");
        std::env::remove_var("DIALOGFLOW_PROJECT_ID");
    }
    let config = WebhookConfig::from_env();
    assert_eq!(config.version, 4);
    assert!(config.features.nearest_subzone);
    assert_eq!(config.project_id, "sgweather-8b165");

    unsafe {
        std::env::set_var("WEBHOOK_VERSION", "2");
        std::env::set_var("DIALOGFLOW_PROJECT_ID", "weather-staging");
    }
    let config = WebhookConfig::from_env();
    assert_eq!(config.version, 2);
    assert!(config.features.context_followups);
    assert!(!config.features.location_permission);
    assert!(!config.features.nearest_subzone);
    assert_eq!(config.project_id, "weather-staging");

    // Single flags override the version's feature set
    unsafe {
        std::env::set_var("WEBHOOK_NEAREST_SUBZONE", "TRUE");
        std::env::set_var("WEBHOOK_CONTEXT_FOLLOWUPS", "false");
    }
    let config = WebhookConfig::from_env();
    assert!(config.features.nearest_subzone);
    assert!(!config.features.context_followups);

    unsafe {
        std::env::set_var("WEBHOOK_VERSION", "zero");
        std::env::remove_var("WEBHOOK_NEAREST_SUBZONE");
        std::env::remove_var("WEBHOOK_CONTEXT_FOLLOWUPS");
    }
    let config = WebhookConfig::from_env();
    assert_eq!(config.version, 4, "Invalid version should fall back to latest");

    unsafe {
        std::env::set_var("WEBHOOK_VERSION", "0");
    }
    assert_eq!(WebhookConfig::from_env().version, 4);

    unsafe {
        std::env::remove_var("WEBHOOK_VERSION");
        std::env::remove_var("DIALOGFLOW_PROJECT_ID");
    }
}

#[test]
fn test_forecast_client_config_from_env() {
    unsafe {
        std::env::set_var("FORECAST_API_BASE_URL", "http://localhost:9100/v1/environment/");
        std::env::set_var("FORECAST_USER_AGENT", "sgweather-staging");
        std::env::set_var("FORECAST_REQUEST_TIMEOUT", "12");
        std::env::set_var("FORECAST_CONNECT_TIMEOUT", "not-a-number");
    }

    let config = ForecastClientConfig::from_env();
    assert_eq!(config.base_url, "http://localhost:9100/v1/environment");
    assert_eq!(config.user_agent, "sgweather-staging");
    assert_eq!(config.request_timeout_seconds, 12);
    assert_eq!(
        config.connect_timeout_seconds, 3,
        "Unparseable timeout should keep the default"
    );

    unsafe {
        std::env::remove_var("FORECAST_API_BASE_URL");
        std::env::remove_var("FORECAST_USER_AGENT");
        std::env::remove_var("FORECAST_REQUEST_TIMEOUT");
        std::env::remove_var("FORECAST_CONNECT_TIMEOUT");
    }

    let config = ForecastClientConfig::from_env();
    assert_eq!(config.base_url, "https://api.data.gov.sg/v1/environment");
    assert_eq!(config.request_timeout_seconds, 5);
}

#[test]
fn test_server_config_bind_override_and_metrics_toggle() {
    unsafe {
        std::env::set_var("BIND_ADDRESS", "0.0.0.0:9090");
        std::env::set_var("METRICS_ENABLED", "false");
    }

    let config = ServerConfig::from_env();
    assert_eq!(config.bind_address, "0.0.0.0:9090");
    assert!(!config.metrics_enabled);

    unsafe {
        std::env::remove_var("BIND_ADDRESS");
        std::env::remove_var("METRICS_ENABLED");
    }

    assert!(ServerConfig::from_env().metrics_enabled);
}
