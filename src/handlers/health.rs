//! Health check endpoint handler.

use crate::{models::HealthResponse, services::ForecastOrchestrator};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

/// Health check endpoint
///
/// Reports liveness and the webhook version being served. Does not call the
/// upstream forecast API.
#[api_v2_operation(
    summary = "Health Check Endpoint",
    description = "Returns the current health status of the webhook and its active version in JSON format.",
    tags("Health"),
    responses(
        (status = 200, description = "Successful response", body = HealthResponse)
    )
)]
pub async fn health(req: HttpRequest) -> Result<web::Json<HealthResponse>, Error> {
    let webhook_version = req
        .app_data::<web::Data<ForecastOrchestrator>>()
        .map(|o| o.config().version)
        .unwrap_or(crate::config::LATEST_WEBHOOK_VERSION);

    Ok(web::Json(HealthResponse {
        status: "healthy".to_string(),
        webhook_version,
    }))
}
