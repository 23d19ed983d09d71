//! Main HTTP Gateway Server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use objscan_detection::Detector;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::{control_ui, health_api, upload};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub detector: Arc<Detector>,
    pub started_at: Instant,
    pub max_upload_bytes: usize,
}

impl GatewayState {
    pub fn new(detector: Detector, max_upload_bytes: usize) -> Self {
        Self {
            detector: Arc::new(detector),
            started_at: Instant::now(),
            max_upload_bytes,
        }
    }
}

/// Build the router with every route and layer.
pub fn build_router(state: GatewayState) -> Router {
    let limit = state.max_upload_bytes;
    Router::new()
        .route("/", get(control_ui::index))
        .route("/health", get(health_api::health))
        .route("/api/health", get(health_api::health_report))
        .route("/upload", post(upload::upload_and_analyze))
        .layer(DefaultBodyLimit::max(limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Gateway HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C; shutdown only on process exit");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
