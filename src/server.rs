//! Axum server setup, shared application state, and graceful shutdown.
//!
//! Contains [`AppState`] (the `Arc`-shared state holding the event
//! router, config metadata, stats, and uptime), [`build_router`] for
//! constructing the Axum router with middleware layers,
//! [`build_http_client`] for the connection-pooled hyper client used for
//! webhook delivery, and [`shutdown_signal`] for SIGTERM / Ctrl+C
//! handling.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::routing::{get, post};
use axum::Router;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::{ConfigVersion, LoadedConfig};
use crate::forward::dispatch::Transport;
use crate::forward::form_submit_handler;
use crate::forward::router::EventRouter;
use crate::health::health_handler;
use crate::operator::triggers::TriggerRegistry;

#[derive(Debug)]
pub struct Stats {
    pub delivered: AtomicU64,
    pub failed: AtomicU64,
    pub not_configured: AtomicU64,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delivered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            not_configured: AtomicU64::new(0),
        }
    }
}

pub type HttpsConnector =
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;
pub type HttpClient = Client<HttpsConnector, http_body_util::Full<bytes::Bytes>>;

pub struct AppState {
    pub router: EventRouter,
    pub config_source: String,
    pub config_version: ConfigVersion,
    pub loaded_at: Instant,
    /// When set, events are only routed for workbooks with an installed trigger.
    pub triggers: Option<Arc<dyn TriggerRegistry>>,
    pub start_time: Instant,
    pub stats: Stats,
    pub delivery_lock: tokio::sync::Mutex<()>,
}

impl AppState {
    #[must_use]
    pub fn new(loaded: LoadedConfig, transport: Arc<dyn Transport>) -> Self {
        let now = Instant::now();
        Self {
            router: EventRouter::new(Arc::new(loaded.config.webhooks), transport),
            config_source: loaded.source_name,
            config_version: loaded.version,
            loaded_at: now,
            triggers: None,
            start_time: now,
            stats: Stats::new(),
            delivery_lock: tokio::sync::Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_triggers(mut self, registry: Arc<dyn TriggerRegistry>) -> Self {
        self.triggers = Some(registry);
        self
    }
}

#[must_use]
pub fn build_http_client() -> HttpClient {
    // When multiple rustls crypto providers are compiled in, rustls cannot
    // auto-detect which one to use. Explicitly install `ring`.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();
    Client::builder(TokioExecutor::new())
        .pool_idle_timeout(Duration::from_secs(30))
        .build(https)
}

pub fn build_router(state: Arc<AppState>, max_body: usize) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/events/form-submit", post(form_submit_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body)),
        )
        .with_state(state)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
