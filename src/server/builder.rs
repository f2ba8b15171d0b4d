//! ServerBuilder for a fluent API to assemble and run the HTTP server

use crate::config::AppConfig;
use crate::server::{AppState, build_routes};
use crate::storage::{AdvertisementStore, PropertyStore, ReservationStore};
use anyhow::{Result, anyhow};
use axum::Router;
use tokio::net::TcpListener;

/// Builder for the casabook HTTP server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_store(InMemoryStore::new())
///     .with_config(AppConfig::default())
///     .serve()
///     .await?;
/// ```
#[derive(Default)]
pub struct ServerBuilder {
    state: Option<AppState>,
    config: AppConfig,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backing store (required)
    pub fn with_store<S>(mut self, store: S) -> Self
    where
        S: PropertyStore + AdvertisementStore + ReservationStore + 'static,
    {
        self.state = Some(AppState::from_store(store));
        self
    }

    /// Set the server configuration; defaults to [`AppConfig::default`]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the application router
    pub fn build(self) -> Result<Router> {
        let state = self
            .state
            .ok_or_else(|| anyhow!("a store is required; call with_store() first"))?;
        Ok(build_routes(state))
    }

    /// Bind and serve until the process is stopped
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr();
        let app = self.build()?;

        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    #[test]
    fn test_build_requires_store() {
        assert!(ServerBuilder::new().build().is_err());
    }

    #[test]
    fn test_build_with_store() {
        let router = ServerBuilder::new()
            .with_store(InMemoryStore::new())
            .build();
        assert!(router.is_ok());
    }
}
