use actix_web::{HttpServer, web};
use sgweather_webhook::{
    AppMetrics, ForecastClient, ForecastClientConfig, ForecastClientMetrics,
    ForecastOrchestrator, ServerConfig, WebhookConfig, create_base_app,
};
use std::{io, sync::Arc};
use tracing_subscriber::{EnvFilter, fmt};

/// Human-readable logs by default, one JSON object per line with `LOG_FORMAT=json`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}

fn startup_error(e: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("Failed to start webhook: {e}"))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let server_config = ServerConfig::from_env();
    let webhook_config = WebhookConfig::from_env();
    let client_config = ForecastClientConfig::from_env();

    let metrics = AppMetrics::new().map_err(startup_error)?;
    let client_metrics = ForecastClientMetrics::new(&metrics.registry).map_err(startup_error)?;
    let client = ForecastClient::new(client_config, Some(client_metrics)).map_err(startup_error)?;

    tracing::info!(
        bind_address = %server_config.bind_address,
        webhook_version = webhook_config.version,
        features = ?webhook_config.features,
        forecast_api = %client.config().base_url,
        "Starting SG weather webhook"
    );

    let bind_address = server_config.bind_address.clone();
    let orchestrator = web::Data::new(ForecastOrchestrator::new(Arc::new(client), webhook_config));
    let metrics = web::Data::new(metrics);
    let server_config = web::Data::new(server_config);

    HttpServer::new(move || {
        create_base_app(orchestrator.clone(), metrics.clone(), server_config.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
