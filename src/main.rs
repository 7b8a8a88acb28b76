use ai_llm_service::telemetry;
use anyhow::Context;
use tracing::{Level, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real environment wins.
    dotenvy::dotenv().ok();

    let level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|v| v.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("warn", level))
        .with(telemetry::layer())
        .try_init()
        .context("failed to install tracing subscriber")?;

    info!(version = env!("CARGO_PKG_VERSION"), "starting mcp-rag-backend");
    api::start().await.context("API server failed")?;

    Ok(())
}
