//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] JSON payload containing the server
//! version, uptime, config source metadata, the number of configured
//! tabs, and cumulative delivery statistics.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::server::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub config: ConfigHealth,
    pub stats: StatsResponse,
}

#[derive(Serialize, Deserialize)]
pub struct ConfigHealth {
    pub source: String,
    pub version: String,
    pub loaded_ago_seconds: u64,
    pub tabs: usize,
    pub triggers_enforced: bool,
}

#[derive(Serialize, Deserialize)]
pub struct StatsResponse {
    pub submissions_delivered: u64,
    pub submissions_failed: u64,
    pub submissions_not_configured: u64,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        config: ConfigHealth {
            source: state.config_source.clone(),
            version: state.config_version.short().to_string(),
            loaded_ago_seconds: state.loaded_at.elapsed().as_secs(),
            tabs: state.router.webhooks().len(),
            triggers_enforced: state.triggers.is_some(),
        },
        stats: StatsResponse {
            submissions_delivered: state.stats.delivered.load(Ordering::Relaxed),
            submissions_failed: state.stats.failed.load(Ordering::Relaxed),
            submissions_not_configured: state.stats.not_configured.load(Ordering::Relaxed),
        },
    })
}
