use anyhow::Context;
use dotenvy::dotenv;

use tutorhub::router::init_router;
use tutorhub::state::init_app_state;
use tutorhub_config::AppConfig;
use tutorhub_observability::{init_logging, init_metrics};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let config = AppConfig::from_env();
    let metrics = if config.metrics_enabled {
        init_metrics()
    } else {
        None
    };

    let state = init_app_state(&config).await?;
    let app = init_router(state, metrics);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    tracing::info!(%address, "server listening");
    tracing::info!("API docs at {}/swagger-ui and {}/scalar", config.public_base_url, config.public_base_url);

    axum::serve(listener, app).await?;
    Ok(())
}
