//! Dialogflow fulfillment endpoint handler.

use crate::{
    models::{WebhookRequest, WebhookResponse},
    services::{AppMetrics, ForecastOrchestrator},
};
use actix_web::{Error, HttpMessage, HttpRequest, Result, web};
use chrono::Utc;
use paperclip::actix::api_v2_operation;

/// Fulfillment webhook
///
/// Answers `GetWeather` and `IsRaining` turns (and their follow-ups) from
/// the data.gov.sg forecasts. Upstream failures still produce a 200 whose
/// `fulfillmentText` carries the error, so the assistant can speak it.
#[api_v2_operation(
    summary = "Dialogflow Fulfillment Webhook",
    description = "Accepts a Dialogflow v2 WebhookRequest and returns a WebhookResponse with spoken text, Actions on Google rich response, suggestion chips and output contexts. May instead ask for device location permission.",
    tags("Webhook"),
    responses(
        (status = 200, description = "Fulfillment response", body = WebhookResponse),
        (status = 400, description = "Bad Request - Body is not a webhook request"),
        (status = 503, description = "Service Unavailable - Forecast service not configured")
    )
)]
pub async fn webhook(
    req: HttpRequest,
    body: web::Json<WebhookRequest>,
) -> Result<web::Json<WebhookResponse>, Error> {
    let Some(orchestrator) = req.app_data::<web::Data<ForecastOrchestrator>>() else {
        return Err(actix_web::error::ErrorServiceUnavailable(
            "Forecast service not configured",
        ));
    };

    let request_id = req
        .extensions()
        .get::<String>()
        .cloned()
        .unwrap_or_else(|| "unknown".to_string());

    let fulfillment = orchestrator.fulfill(&body, Utc::now()).await;

    if let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() {
        metrics.record_fulfillment(&fulfillment);
    }

    tracing::info!(
        request_id = %request_id,
        session_id = %body.session_id(),
        intent = %fulfillment.intent,
        bucket = %fulfillment.bucket,
        outcome = %fulfillment.outcome,
        "Fulfillment completed"
    );

    Ok(web::Json(fulfillment.response))
}
