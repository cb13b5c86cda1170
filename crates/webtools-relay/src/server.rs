//! HTTP server for the relay

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;
use webtools_core::{
    builtin_tools, BackendClient, Catalog, CatalogHandle, Classifier, ExecutionContext, SharedLogger,
    ToolLoader, TracingLogger, WebToolsConfig,
};

use crate::routes;

/// State shared across handlers
pub struct RelayState {
    pub backend: BackendClient,
    pub catalog: CatalogHandle,
    pub loader: ToolLoader,
    pub start_time: Instant,
}

/// Outcome of a catalog rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Tools reported by the backend
    pub fetched: usize,
    /// Tools in the merged catalog
    pub total: usize,
}

impl RelayState {
    /// Catalog starts out as the builtin list until the first refresh
    pub fn new(backend: BackendClient, loader: ToolLoader) -> Self {
        Self {
            backend,
            catalog: CatalogHandle::new(Catalog::new(builtin_tools())),
            loader,
            start_time: Instant::now(),
        }
    }

    pub fn from_config(config: &WebToolsConfig, logger: SharedLogger) -> Self {
        let backend = BackendClient::new(ExecutionContext::from_config(config), logger.clone());
        let loader = ToolLoader::new(Classifier::from_config(config), logger);
        Self::new(backend, loader)
    }

    /// Re-fetch backend tools and swap in a freshly merged catalog
    ///
    /// A backend failure leaves the builtin tools as the whole catalog.
    pub async fn refresh_catalog(&self) -> RefreshSummary {
        let dynamic = self.loader.load(&self.backend).await;
        let fetched = dynamic.len();
        let catalog = Catalog::merge(builtin_tools(), dynamic);
        let total = catalog.len();
        self.catalog.replace(catalog);

        info!("Catalog refreshed: {} fetched, {} total", fetched, total);
        RefreshSummary { fetched, total }
    }
}

/// Assemble the relay's routes
pub fn build_router(state: Arc<RelayState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .merge(routes::agent_routes())
        .merge(routes::tool_routes())
        .merge(routes::catalog_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
}

/// Run the relay until Ctrl-C
pub async fn run(config: WebToolsConfig) -> Result<()> {
    let logger: SharedLogger = Arc::new(TracingLogger::with_target("webtools::relay"));
    let state = Arc::new(RelayState::from_config(&config, logger));

    info!("Backend: {}", state.backend.context().base_url());
    state.refresh_catalog().await;

    let app = build_router(state, config.relay.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(&config.relay.bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
    }
}
