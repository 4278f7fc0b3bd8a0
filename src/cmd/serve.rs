//! `sheethook serve`: start the form-submission endpoint.
//!
//! Loads the configuration once, builds the webhook transport and event
//! router, and serves `POST /events/form-submit` and `GET /health` until
//! Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::ServeArgs;
use crate::config;
use crate::error::SheethookError;
use crate::forward::dispatch::HyperTransport;
use crate::logging::{self, LogOutput};
use crate::operator::triggers::FileTriggerRegistry;
use crate::server::{self, AppState};

pub async fn execute(args: ServeArgs) -> Result<(), SheethookError> {
    logging::init_from_args(&args.log, LogOutput::Stdout);

    #[cfg(feature = "sentry-integration")]
    let _sentry_guard = args
        .sentry_dsn
        .as_ref()
        .map(|dsn| crate::sentry_integration::init(dsn, args.sentry_environment.as_deref()));

    let mut loaded = config::load(args.config.as_deref()).await?;

    if let Some(timeout) = args.timeout {
        loaded.config.defaults.timeout = timeout;
    }
    let timeout = Duration::from_millis(loaded.config.defaults.timeout);
    let tab_count = loaded.config.webhooks.len();

    for (tab, url) in loaded.config.webhooks.iter() {
        tracing::debug!(tab = %tab, url = %url, "webhook configured");
    }

    let transport = Arc::new(HyperTransport::new(server::build_http_client(), timeout));
    let mut state = AppState::new(loaded, transport);
    if let Some(ref path) = args.triggers {
        tracing::info!(path = %path.display(), "trigger registry enforced");
        state = state.with_triggers(Arc::new(FileTriggerRegistry::new(path.clone())));
    }

    let router = server::build_router(Arc::new(state), args.max_body);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        tabs = tab_count,
        timeout_ms = timeout.as_millis() as u64,
        "sheethook started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("sheethook stopped");
    Ok(())
}
