use anyhow::Context;
use placeholder_image::core::placeholder::PlaceholderService;
use placeholder_image::settings::{get_config, get_placeholder_settings};
use placeholder_image::{AppState, init_openapi_route};
use poem::listener::TcpListener;
use tracing::Level;

use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_level = Level::DEBUG;
    // Logging to File
    let file_appender = tracing_appender::rolling::daily("./logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(log_level)
        .init();

    tracing::info!("Initializing Placeholder Image Service...");

    let config = get_config().context("invalid server configuration")?;
    tracing::info!("run with config: {:?}", config);

    let settings = get_placeholder_settings().context("invalid image generation settings")?;
    tracing::info!("image generation settings: {:?}", settings);

    let app_state = Arc::new(AppState {
        service: Arc::new(PlaceholderService::new(settings)),
    });

    let app = init_openapi_route(app_state, &config);
    tracing::info!("run server on {}:{}", config.host, config.port);
    poem::Server::new(TcpListener::bind(format!(
        "{}:{}",
        config.host, config.port
    )))
    .run(app)
    .await
    .context("server terminated")
}
