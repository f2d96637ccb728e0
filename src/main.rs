use std::sync::Arc;

use color_eyre::eyre::Result;
use nimbus::{Settings, WeatherAppService, build_state, configure_postmark, configure_sqlite};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load()?;

    let pool = configure_sqlite(&settings).await?;
    let email_client = configure_postmark(&settings)?;
    let state = build_state(&settings, pool, Arc::new(email_client))?;

    let listener = tokio::net::TcpListener::bind(settings.application.address()).await?;
    tracing::info!("Starting weather app...");

    WeatherAppService::new(state, &settings.application.assets_dir)
        .run_standalone(listener, settings.allowed_origins.clone())
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
