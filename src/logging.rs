//! Structured logging setup using the `tracing` ecosystem.
//!
//! Configures a `tracing-subscriber` with either JSON output (for
//! production) or pretty-printed output (for TTY / local dev). Format
//! is auto-detected from the terminal but can be forced via `--json`
//! or `--pretty`. The server logs to stdout; operator commands log to
//! stderr so their notices stay readable.
//!
//! With the `sentry-integration` feature, events are also forwarded to
//! Sentry through `sentry-tracing`.

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{LogArgs, LogLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
}

#[must_use]
pub fn resolve_format(pretty: bool, json: bool) -> LogFormat {
    if json {
        LogFormat::Json
    } else if pretty || std::io::IsTerminal::is_terminal(&std::io::stdout()) {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}

/// Initialize logging from the shared CLI flags.
pub fn init_from_args(args: &LogArgs, output: LogOutput) {
    init(&args.log_level, resolve_format(args.pretty, args.json), output);
}

pub fn init(level: &LogLevel, format: LogFormat, output: LogOutput) {
    let tracing_level = level.to_tracing_level();
    let filter = tracing_subscriber::filter::Targets::new().with_default(tracing_level);

    let writer = match output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
    };

    #[cfg(feature = "sentry-integration")]
    let sentry_layer = Some(sentry_tracing::layer());
    #[cfg(not(feature = "sentry-integration"))]
    let sentry_layer: Option<tracing_subscriber::layer::Identity> = None;

    // try_init: a second call (tests, menu re-entry) keeps the first subscriber.
    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(sentry_layer)
            .with(fmt::layer().json().with_target(false).with_writer(writer))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(sentry_layer)
            .with(fmt::layer().pretty().with_writer(writer))
            .try_init(),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "logging already initialized");
    }
}
