//! HTTP server configuration.

use std::{env, path::Path};

const LOCAL_BIND_ADDRESS: &str = "127.0.0.1:8080";
const CONTAINER_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Configuration for the HTTP listener and the metrics endpoint
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub metrics_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: LOCAL_BIND_ADDRESS.to_string(),
            metrics_enabled: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let bind_address = detect_bind_address(
            env::var("BIND_ADDRESS").ok().as_deref(),
            is_container_environment(
                env::var("KUBERNETES_SERVICE_HOST").ok().as_deref(),
                env::var("DOCKER_CONTAINER").ok().as_deref(),
                Path::new("/.dockerenv").exists(),
            ),
        );

        let metrics_enabled = env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(true);

        Self {
            bind_address,
            metrics_enabled,
        }
    }
}

/// Explicit override wins; containers listen on all interfaces.
pub fn detect_bind_address(bind_override: Option<&str>, in_container: bool) -> String {
    if let Some(bind) = bind_override.filter(|b| !b.is_empty()) {
        return bind.to_string();
    }

    if in_container {
        CONTAINER_BIND_ADDRESS.to_string()
    } else {
        LOCAL_BIND_ADDRESS.to_string()
    }
}

pub fn is_container_environment(
    k8s_service_host: Option<&str>,
    docker_container: Option<&str>,
    dockerenv_exists: bool,
) -> bool {
    k8s_service_host.is_some() || docker_container.is_some() || dockerenv_exists
}
