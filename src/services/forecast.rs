//! Forecast orchestration: pick the upstream endpoint for an area and date,
//! phrase the answer and wrap it in a fulfillment response.

use crate::{
    config::WebhookConfig,
    models::{WebhookRequest, WebhookResponse},
    services::{
        area::{AREA_SINGAPORE, resolve_area},
        date::{DateBucket, NormalizedDate, normalize_date},
        forecast_client::{ForecastEndpoint, ForecastError, ForecastSource},
        intent::{EffectiveIntent, INTENT_REQUEST_LOCATION, resolve_intent},
        response::{SessionRef, Topic, answer_response, permission_response},
    },
};
use chrono::{DateTime, Utc};
use std::{fmt, sync::Arc};
use tracing::{debug, info, warn};

/// Reply when the intent cannot be resolved
pub const DEFAULT_FALLBACK_TEXT: &str = "Sorry, I don't know about the weather";

const RAIN_TOKENS: [&str; 2] = ["rain", "shower"];

/// A phrased answer and the raw forecast it was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastResult {
    pub text: String,
    /// `None` when no entry matched the area or date
    pub forecast: Option<String>,
}

impl ForecastResult {
    fn found(text: String, forecast: &str) -> Self {
        Self {
            text,
            forecast: Some(forecast.to_string()),
        }
    }

    fn not_found(subject: &str) -> Self {
        Self {
            text: format!("No weather found for {subject}."),
            forecast: None,
        }
    }
}

/// How a fulfillment request was answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentOutcome {
    Answered,
    NotFound,
    PermissionRequested,
    Fallback,
    UpstreamError,
}

impl FulfillmentOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentOutcome::Answered => "answered",
            FulfillmentOutcome::NotFound => "not_found",
            FulfillmentOutcome::PermissionRequested => "permission_requested",
            FulfillmentOutcome::Fallback => "fallback",
            FulfillmentOutcome::UpstreamError => "upstream_error",
        }
    }
}

impl fmt::Display for FulfillmentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fulfillment response plus what was decided along the way
#[derive(Debug, Clone)]
pub struct Fulfillment {
    pub intent: EffectiveIntent,
    pub bucket: DateBucket,
    pub outcome: FulfillmentOutcome,
    pub response: WebhookResponse,
}

/// Answers weather and rain questions from the upstream forecasts
pub struct ForecastOrchestrator {
    source: Arc<dyn ForecastSource>,
    config: WebhookConfig,
}

impl ForecastOrchestrator {
    pub fn new(source: Arc<dyn ForecastSource>, config: WebhookConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Handle one fulfillment request. `now` is the time the request arrived.
    ///
    /// Upstream failures do not fail the request: the error text becomes the
    /// spoken reply.
    pub async fn fulfill(&self, request: &WebhookRequest, now: DateTime<Utc>) -> Fulfillment {
        let features = &self.config.features;
        let parameters = &request.query_result.parameters;

        let intent = resolve_intent(
            request.intent_name(),
            request.context_names().as_slice(),
            features,
        );
        let date = normalize_date(parameters.date.as_deref(), now);
        let area = resolve_area(
            parameters.area.as_deref(),
            request.device_coordinates(),
            features,
        );

        info!(
            raw_intent = %request.intent_name(),
            intent = %intent,
            area = %area,
            date = %date.iso_date,
            bucket = %date.bucket,
            "Resolved fulfillment request"
        );

        let fulfillment = |outcome: FulfillmentOutcome, response: WebhookResponse| Fulfillment {
            intent,
            bucket: date.bucket,
            outcome,
            response,
        };

        let Some(topic) = Topic::from_intent(intent) else {
            return fulfillment(
                FulfillmentOutcome::Fallback,
                WebhookResponse::text_only(DEFAULT_FALLBACK_TEXT),
            );
        };

        let session = SessionRef {
            project_id: &self.config.project_id,
            session_id: request.session_id(),
        };

        if self.should_request_location(request, &area, &date) {
            debug!(topic = ?topic, "Requesting device location permission");
            return fulfillment(
                FulfillmentOutcome::PermissionRequested,
                permission_response(topic, session),
            );
        }

        let result = match topic {
            Topic::Weather => self.get_weather(&area, &date).await,
            Topic::Raining => self.get_rain_status(&area, &date).await,
        };

        match result {
            Ok(result) => {
                let outcome = if result.forecast.is_some() {
                    FulfillmentOutcome::Answered
                } else {
                    FulfillmentOutcome::NotFound
                };
                fulfillment(
                    outcome,
                    answer_response(&result.text, topic, date.bucket, session),
                )
            }
            Err(e) => {
                warn!(error = %e, area = %area, "Forecast lookup failed");
                fulfillment(
                    FulfillmentOutcome::UpstreamError,
                    WebhookResponse::text_only(e.to_string()),
                )
            }
        }
    }

    /// Describe the weather for an area and date.
    pub async fn get_weather(
        &self,
        area: &str,
        date: &NormalizedDate,
    ) -> Result<ForecastResult, ForecastError> {
        let endpoint = select_endpoint(area, date.bucket);
        debug!(
            area = %area,
            bucket = %date.bucket,
            endpoint = %endpoint,
            "Selected forecast endpoint"
        );

        match endpoint {
            ForecastEndpoint::TwoHour => self.two_hour_forecast(area).await,
            ForecastEndpoint::TwentyFourHour => self.twenty_four_hour_forecast(area).await,
            ForecastEndpoint::FourDay => self.four_day_forecast(area, date).await,
        }
    }

    /// Say whether it rains for an area and date.
    ///
    /// Rain is inferred from the forecast wording, see [`mentions_rain`].
    pub async fn get_rain_status(
        &self,
        area: &str,
        date: &NormalizedDate,
    ) -> Result<ForecastResult, ForecastError> {
        let weather = self.get_weather(area, date).await?;
        let Some(forecast) = weather.forecast else {
            return Ok(weather);
        };

        let text = rain_sentence(area, date, mentions_rain(&forecast));
        Ok(ForecastResult {
            text,
            forecast: Some(forecast),
        })
    }

    fn should_request_location(
        &self,
        request: &WebhookRequest,
        area: &str,
        date: &NormalizedDate,
    ) -> bool {
        // The location follow-up itself never asks again, granted or not.
        self.config.features.location_permission
            && date.bucket == DateBucket::Now
            && is_default_area(area)
            && request.supports_device_location()
            && request.intent_name() != INTENT_REQUEST_LOCATION
    }

    async fn two_hour_forecast(&self, area: &str) -> Result<ForecastResult, ForecastError> {
        let response = self.source.two_hour().await?;
        let item = response
            .items
            .first()
            .ok_or(ForecastError::MissingItems(ForecastEndpoint::TwoHour))?;

        Ok(item
            .forecasts
            .iter()
            .find(|f| f.area.to_lowercase() == area.to_lowercase())
            .map(|f| {
                ForecastResult::found(
                    format!("The weather in {area} is {}.", f.forecast.to_lowercase()),
                    &f.forecast,
                )
            })
            .unwrap_or_else(|| ForecastResult::not_found(area)))
    }

    async fn twenty_four_hour_forecast(&self, area: &str) -> Result<ForecastResult, ForecastError> {
        let response = self.source.twenty_four_hour().await?;
        let item = response
            .items
            .first()
            .ok_or(ForecastError::MissingItems(ForecastEndpoint::TwentyFourHour))?;

        let forecast = &item.general.forecast;
        Ok(ForecastResult::found(
            format!(
                "The weather in {area} for today will be {}.",
                forecast.to_lowercase()
            ),
            forecast,
        ))
    }

    async fn four_day_forecast(
        &self,
        area: &str,
        date: &NormalizedDate,
    ) -> Result<ForecastResult, ForecastError> {
        let response = self.source.four_day().await?;
        let item = response
            .items
            .first()
            .ok_or(ForecastError::MissingItems(ForecastEndpoint::FourDay))?;

        Ok(item
            .forecasts
            .iter()
            .find(|f| f.date == date.iso_date)
            .map(|f| {
                let when = match date.bucket.label() {
                    Some(label) => format!("for {label}"),
                    None => format!("on {}", date.iso_date),
                };
                ForecastResult::found(
                    format!(
                        "The weather in {area} {when} will be {}.",
                        f.forecast.to_lowercase()
                    ),
                    &f.forecast,
                )
            })
            .unwrap_or_else(|| ForecastResult::not_found(&date.iso_date)))
    }
}

/// Endpoint answering a given area and date bucket.
///
/// The 24-hour forecast has no per-area breakdown, so "today" in a subzone
/// gets the island-wide outlook.
pub fn select_endpoint(area: &str, bucket: DateBucket) -> ForecastEndpoint {
    match bucket {
        DateBucket::Now if !is_default_area(area) => ForecastEndpoint::TwoHour,
        DateBucket::Now | DateBucket::Today => ForecastEndpoint::TwentyFourHour,
        DateBucket::Tomorrow | DateBucket::DayAfterTomorrow | DateBucket::Invalid => {
            ForecastEndpoint::FourDay
        }
    }
}

pub fn is_default_area(area: &str) -> bool {
    area.eq_ignore_ascii_case(AREA_SINGAPORE)
}

/// Whether forecast wording implies rain. Matches substrings, so any word
/// containing "rain" or "shower" counts.
pub fn mentions_rain(forecast: &str) -> bool {
    let forecast = forecast.to_lowercase();
    RAIN_TOKENS.iter().any(|token| forecast.contains(token))
}

fn rain_sentence(area: &str, date: &NormalizedDate, raining: bool) -> String {
    let verb = if raining { "be" } else { "not be" };
    match date.bucket {
        DateBucket::Now if !is_default_area(area) => {
            let verb = if raining { "is" } else { "is not" };
            format!("It {verb} raining in {area}.")
        }
        DateBucket::Now | DateBucket::Today => format!("It will {verb} raining in {area} today."),
        DateBucket::Tomorrow | DateBucket::DayAfterTomorrow => format!(
            "It will {verb} raining in {area} {}.",
            date.bucket.label().unwrap_or_default()
        ),
        DateBucket::Invalid => {
            format!("It will {verb} raining in {area} on {}.", date.iso_date)
        }
    }
}
