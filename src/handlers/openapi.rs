//! OpenAPI specification generation and app factory.

use crate::{
    config::ServerConfig,
    handlers::{get_metrics, health, version, webhook},
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    services::{AppMetrics, ForecastOrchestrator},
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the OpenAPI specification for the webhook
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "SG Weather Webhook".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Dialogflow v2 fulfillment webhook answering weather and rain questions for Singapore subzones from the data.gov.sg forecasts.\n\n\
                ## Fulfillment\n\
                `POST /webhook` takes the Dialogflow WebhookRequest. Handled intents:\n\
                - `GetWeather`, `IsRaining`\n\
                - `WeatherContext`, `RainingContext` (follow-ups, version 2+)\n\
                - `RequestLocation` (location permission follow-up, version 3+)\n\
                \n\
                Failures from the forecast API are returned as `fulfillmentText` with status 200.\n\
                \n\
                **Configuration:**\n\
                - `WEBHOOK_VERSION` selects the feature set (1-4, default 4)\n\
                - `DIALOGFLOW_PROJECT_ID` names the project in output context paths\n\
                - `FORECAST_API_BASE_URL` overrides the upstream API location".into()
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the app with shared state
///
/// Shared state is passed in as `Data` so that every worker of an
/// `HttpServer` serves from the same orchestrator and metrics registry.
pub fn create_base_app(
    orchestrator: web::Data<ForecastOrchestrator>,
    metrics: web::Data<AppMetrics>,
    server_config: web::Data<ServerConfig>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(orchestrator)
        .app_data(metrics)
        .app_data(server_config)
        .service(web::resource("/webhook").route(web::post().to(webhook)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
