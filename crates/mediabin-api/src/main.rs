use mediabin_api::setup::{initialize_app, start_server};
use mediabin_core::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!(?config, "Starting mediabin");

    let (state, router) = initialize_app(config).await?;
    start_server(state, router).await
}
