//! HTTP client for the data.gov.sg environment forecast endpoints.
//!
//! One attempt per request: timeouts are enforced, failures are logged and
//! counted, and the error is handed back to the caller untouched.

use crate::models::{
    FourDayForecastResponse, TwentyFourHourForecastResponse, TwoHourForecastResponse,
};
use async_trait::async_trait;
use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{fmt, time::Duration};
use tracing::{error, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.data.gov.sg/v1/environment";

/// The three read-only forecast endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastEndpoint {
    TwoHour,
    TwentyFourHour,
    FourDay,
}

impl ForecastEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            ForecastEndpoint::TwoHour => "2-hour-weather-forecast",
            ForecastEndpoint::TwentyFourHour => "24-hour-weather-forecast",
            ForecastEndpoint::FourDay => "4-day-weather-forecast",
        }
    }
}

impl fmt::Display for ForecastEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Source of upstream forecasts
///
/// Implemented by [`ForecastClient`] for the live API; tests substitute
/// canned responses.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn two_hour(&self) -> Result<TwoHourForecastResponse, ForecastError>;

    async fn twenty_four_hour(&self) -> Result<TwentyFourHourForecastResponse, ForecastError>;

    async fn four_day(&self) -> Result<FourDayForecastResponse, ForecastError>;
}

/// Configuration for the forecast client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastClientConfig {
    /// Base URL the endpoint paths are appended to, without trailing slash
    pub base_url: String,

    /// Fixed client identifier sent as `User-Agent`
    pub user_agent: String,

    /// Whole-request timeout (in seconds)
    pub request_timeout_seconds: u64,

    /// Connection timeout (in seconds)
    pub connect_timeout_seconds: u64,

    /// Log every upstream call, not only failures
    pub enable_detailed_logging: bool,
}

impl Default for ForecastClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("sgweather-webhook/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_seconds: 5,
            connect_timeout_seconds: 3,
            enable_detailed_logging: true,
        }
    }
}

/// Metrics for upstream forecast requests
#[derive(Clone)]
pub struct ForecastClientMetrics {
    /// Requests by endpoint and outcome
    pub requests_total: CounterVec,

    /// Request duration by endpoint
    pub request_duration_seconds: HistogramVec,
}

impl ForecastClientMetrics {
    /// Create the collectors and register them with `registry`
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests_total = CounterVec::new(
            Opts::new(
                "forecast_requests_total",
                "Total upstream forecast requests by endpoint and outcome",
            ),
            &["endpoint", "outcome"],
        )?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "forecast_request_duration_seconds",
                "Duration of upstream forecast requests",
            )
            .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["endpoint"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;

        Ok(Self {
            requests_total,
            request_duration_seconds,
        })
    }
}

/// Client for the live forecast API
pub struct ForecastClient {
    client: Client,
    config: ForecastClientConfig,
    metrics: Option<ForecastClientMetrics>,
}

impl ForecastClient {
    /// Create a new forecast client
    pub fn new(
        config: ForecastClientConfig,
        metrics: Option<ForecastClientMetrics>,
    ) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            config,
            metrics,
        })
    }

    pub fn config(&self) -> &ForecastClientConfig {
        &self.config
    }

    /// Full URL of an endpoint
    pub fn endpoint_url(&self, endpoint: ForecastEndpoint) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path()
        )
    }

    /// Host of the configured API, used as a log field
    fn destination(&self) -> String {
        url::Url::parse(&self.config.base_url)
            .map(|u| u.host_str().unwrap_or("unknown").to_string())
            .unwrap_or_else(|_| "invalid_url".to_string())
    }

    /// Fetch and decode one endpoint
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: ForecastEndpoint,
    ) -> Result<T, ForecastError> {
        let url = self.endpoint_url(endpoint);
        let destination = self.destination();
        let start = std::time::Instant::now();

        let result = self.send(&url).await;
        let duration = start.elapsed();
        self.record(endpoint, outcome_label(&result), duration);

        match &result {
            Ok(_) if self.config.enable_detailed_logging => info!(
                destination = %destination,
                endpoint = %endpoint,
                duration_ms = duration.as_millis(),
                "Forecast request completed successfully"
            ),
            Ok(_) => {}
            Err(ForecastError::Timeout) => warn!(
                destination = %destination,
                endpoint = %endpoint,
                timeout_seconds = self.config.request_timeout_seconds,
                "Forecast request timed out"
            ),
            Err(e) => error!(
                destination = %destination,
                endpoint = %endpoint,
                error = %e,
                duration_ms = duration.as_millis(),
                "Forecast request failed"
            ),
        }

        result
    }

    async fn send<T: DeserializeOwned>(&self, url: &str) -> Result<T, ForecastError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ForecastError::from_send)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(ForecastError::from_send)?;
        serde_json::from_slice(&body).map_err(ForecastError::Decode)
    }

    fn record(&self, endpoint: ForecastEndpoint, outcome: &str, duration: Duration) {
        if let Some(metrics) = &self.metrics {
            metrics
                .requests_total
                .with_label_values(&[endpoint.path(), outcome])
                .inc();
            metrics
                .request_duration_seconds
                .with_label_values(&[endpoint.path()])
                .observe(duration.as_secs_f64());
        }
    }
}

#[async_trait]
impl ForecastSource for ForecastClient {
    async fn two_hour(&self) -> Result<TwoHourForecastResponse, ForecastError> {
        self.fetch(ForecastEndpoint::TwoHour).await
    }

    async fn twenty_four_hour(&self) -> Result<TwentyFourHourForecastResponse, ForecastError> {
        self.fetch(ForecastEndpoint::TwentyFourHour).await
    }

    async fn four_day(&self) -> Result<FourDayForecastResponse, ForecastError> {
        self.fetch(ForecastEndpoint::FourDay).await
    }
}

fn outcome_label<T>(result: &Result<T, ForecastError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(ForecastError::Network(_)) => "network_error",
        Err(ForecastError::Timeout) => "timeout",
        Err(ForecastError::Status(_)) => "http_status",
        Err(ForecastError::Decode(_)) => "decode_error",
        Err(ForecastError::MissingItems(_)) => "empty",
    }
}

/// Errors raised while fetching a forecast
///
/// The display string is what the user hears, so it is kept short.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Forecast service returned status {0}")]
    Status(u16),

    #[error("Malformed forecast data: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Forecast service returned no items for {0}")]
    MissingItems(ForecastEndpoint),
}

impl ForecastError {
    fn from_send(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ForecastError::Timeout
        } else {
            ForecastError::Network(e)
        }
    }
}
