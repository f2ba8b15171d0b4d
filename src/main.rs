//! Casabook server binary

use anyhow::Result;
use casabook::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("casabook=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load()?;
    let store = InMemoryStore::new();

    tracing::info!("Starting casabook on {}", config.bind_addr());

    ServerBuilder::new()
        .with_store(store)
        .with_config(config)
        .serve()
        .await
}
