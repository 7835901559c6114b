use actix_web::{http::StatusCode, test, web};
use async_trait::async_trait;
use serde_json::json;
use sgweather_webhook::{
    AppMetrics, ForecastError, ForecastOrchestrator, ForecastSource, ServerConfig, WebhookConfig,
    create_base_app,
    models::{FourDayForecastResponse, TwentyFourHourForecastResponse, TwoHourForecastResponse},
};
use std::sync::Arc;

/// Upstream that always reports a fair island-wide day
struct FairWeather;

#[async_trait]
impl ForecastSource for FairWeather {
    async fn two_hour(&self) -> Result<TwoHourForecastResponse, ForecastError> {
        Ok(TwoHourForecastResponse { items: vec![] })
    }

    async fn twenty_four_hour(&self) -> Result<TwentyFourHourForecastResponse, ForecastError> {
        serde_json::from_value(json!({
            "items": [{ "general": { "forecast": "Fair and Warm" } }]
        }))
        .map_err(ForecastError::Decode)
    }

    async fn four_day(&self) -> Result<FourDayForecastResponse, ForecastError> {
        Ok(FourDayForecastResponse { items: vec![] })
    }
}

fn app_parts(
    server_config: ServerConfig,
) -> (
    web::Data<ForecastOrchestrator>,
    web::Data<AppMetrics>,
    web::Data<ServerConfig>,
) {
    (
        web::Data::new(ForecastOrchestrator::new(
            Arc::new(FairWeather),
            WebhookConfig::for_version(3),
        )),
        web::Data::new(AppMetrics::new().expect("Failed to create metrics")),
        web::Data::new(server_config),
    )
}

/// Health check through the complete application configuration
#[actix_web::test]
async fn test_health_endpoint_integration() {
    let (orchestrator, metrics, config) = app_parts(ServerConfig::default());
    let app = test::init_service(create_base_app(orchestrator, metrics, config)).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK, "Expected 200 OK status");
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.contains("application/json"),
        "Expected JSON content type, got: {content_type}"
    );

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json, json!({ "status": "healthy", "webhook_version": 3 }));
}

#[actix_web::test]
async fn test_version_endpoint_integration() {
    let (orchestrator, metrics, config) = app_parts(ServerConfig::default());
    let app = test::init_service(create_base_app(orchestrator, metrics, config)).await;

    let req = test::TestRequest::get().uri("/api/version").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["commit"].is_string(), "Commit should be a string");
    assert!(json["build_time"].is_string(), "Build time should be a string");
}

#[actix_web::test]
async fn test_request_id_is_generated_and_echoed() {
    let (orchestrator, metrics, config) = app_parts(ServerConfig::default());
    let app = test::init_service(create_base_app(orchestrator, metrics, config)).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(generated.len(), 36, "Expected a UUID, got {generated}");

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "dialogflow-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "dialogflow-42");
}

#[actix_web::test]
async fn test_webhook_carries_request_id() {
    let (orchestrator, metrics, config) = app_parts(ServerConfig::default());
    let app = test::init_service(create_base_app(orchestrator, metrics, config)).await;

    let req = test::TestRequest::post()
        .uri("/webhook")
        .insert_header(("X-Request-ID", "turn-7"))
        .set_json(json!({
            "session": "projects/sgweather-8b165/agent/sessions/s",
            "queryResult": { "intent": { "displayName": "GetWeather" } }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "turn-7");
    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        json["fulfillmentText"],
        "The weather in Singapore for today will be fair and warm."
    );
}

#[actix_web::test]
async fn test_metrics_count_fulfillments() {
    let (orchestrator, metrics, config) = app_parts(ServerConfig::default());
    let app = test::init_service(create_base_app(orchestrator, metrics, config)).await;

    let req = test::TestRequest::post()
        .uri("/webhook")
        .set_json(json!({
            "session": "projects/sgweather-8b165/agent/sessions/s",
            "queryResult": { "intent": { "displayName": "IsRaining" } }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        json["fulfillmentText"],
        "It will not be raining in Singapore today."
    );

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).unwrap();
    assert!(body_str.contains("webhook_fulfillments_total"));
    assert!(body_str.contains(r#"intent="is_raining""#));
    assert!(body_str.contains(r#"outcome="answered""#));
    assert!(body_str.contains(r#"route="/webhook""#));
}

#[actix_web::test]
async fn test_metrics_can_be_disabled() {
    let (orchestrator, metrics, config) = app_parts(ServerConfig {
        metrics_enabled: false,
        ..ServerConfig::default()
    });
    let app = test::init_service(create_base_app(orchestrator, metrics, config)).await;

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_openapi_spec_lists_webhook() {
    let (orchestrator, metrics, config) = app_parts(ServerConfig::default());
    let app = test::init_service(create_base_app(orchestrator, metrics, config)).await;

    let req = test::TestRequest::get().uri("/api/spec/v2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let spec: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(spec["info"]["title"], "SG Weather Webhook");
    assert!(spec["paths"].get("/webhook").is_some());
    assert!(spec["paths"].get("/api/health").is_some());
}

#[actix_web::test]
async fn test_webhook_rejects_get() {
    let (orchestrator, metrics, config) = app_parts(ServerConfig::default());
    let app = test::init_service(create_base_app(orchestrator, metrics, config)).await;

    let req = test::TestRequest::get().uri("/webhook").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
