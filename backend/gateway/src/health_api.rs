//! Gateway Health API

use axum::{Json, extract::State};
use serde::Serialize;

use crate::server::GatewayState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub uptime_seconds: u64,
}

/// Handler for `GET /health`, kept as plain text for load balancers.
pub async fn health() -> &'static str {
    "ok"
}

/// Handler for `GET /api/health`
pub async fn health_report(State(state): State<GatewayState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        service: "objscan",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.detector.provider().to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
