//! Business logic and service layer modules.
//!
//! Intent, date and area resolution are synchronous and free of I/O; the
//! forecast orchestrator combines them with the upstream client.

pub mod area;
pub mod date;
pub mod forecast;
pub mod forecast_client;
pub mod intent;
pub mod metrics;
pub mod response;

pub use area::{AREA_SINGAPORE, SUBZONES, Subzone, nearest_subzone, resolve_area};
pub use date::{DateBucket, NormalizedDate, normalize_date};
pub use forecast::{
    DEFAULT_FALLBACK_TEXT, ForecastOrchestrator, ForecastResult, Fulfillment, FulfillmentOutcome,
    mentions_rain, select_endpoint,
};
pub use forecast_client::{
    ForecastClient, ForecastClientConfig, ForecastClientMetrics, ForecastEndpoint, ForecastError,
    ForecastSource,
};
pub use intent::{EffectiveIntent, resolve_intent};
pub use metrics::*;
