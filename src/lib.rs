//! SG Weather Webhook - Dialogflow fulfillment for Singapore weather
//!
//! Answers "what's the weather" and "is it raining" turns with forecasts
//! from the data.gov.sg environment API:
//! - 2-hour forecasts per subzone for "now"
//! - the 24-hour island-wide outlook for "today"
//! - the 4-day outlook for later dates
//!
//! ## Architecture
//!
//! - `models/` - Dialogflow envelope and upstream forecast payloads
//! - `services/` - intent, date and area resolution, forecast orchestration
//!   and the upstream HTTP client
//! - `handlers/` - HTTP handlers and the app factory
//! - `middleware/` - request IDs and Prometheus metrics
//! - `config/` - environment-driven configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use actix_web::web;
//! use sgweather_webhook::{
//!     create_base_app, AppMetrics, ForecastClient, ForecastClientConfig,
//!     ForecastOrchestrator, ServerConfig, WebhookConfig,
//! };
//!
//! let client = ForecastClient::new(ForecastClientConfig::from_env(), None).unwrap();
//! let orchestrator = ForecastOrchestrator::new(Arc::new(client), WebhookConfig::from_env());
//! let app = create_base_app(
//!     web::Data::new(orchestrator),
//!     web::Data::new(AppMetrics::new().unwrap()),
//!     web::Data::new(ServerConfig::from_env()),
//! );
//! ```

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::{ServerConfig, WebhookConfig, WebhookFeatures};
pub use handlers::{create_base_app, create_openapi_spec, get_metrics, health, version, webhook};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware};
pub use models::{
    Coordinates, HealthResponse, VersionResponse, WebhookRequest, WebhookResponse,
};
pub use services::{
    AppMetrics, DateBucket, EffectiveIntent, ForecastClient, ForecastClientConfig,
    ForecastClientMetrics, ForecastEndpoint, ForecastError, ForecastOrchestrator, ForecastSource,
    FulfillmentOutcome, NormalizedDate, normalize_date, resolve_area, resolve_intent,
};
