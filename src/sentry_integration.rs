//! Optional Sentry error tracking for `sheethook serve`.
//!
//! Failed webhook deliveries are logged at `warn`/`error` and reach
//! Sentry through the `sentry-tracing` layer installed by
//! [`logging`](crate::logging). Hold the returned guard until shutdown.

pub fn init(dsn: &str, environment: Option<&str>) -> sentry::ClientInitGuard {
    let dsn = dsn
        .parse()
        .map_err(|e| tracing::warn!(error = %e, "invalid Sentry DSN, error tracking disabled"))
        .ok();

    sentry::init(sentry::ClientOptions {
        dsn,
        environment: environment.map(|e| e.to_owned().into()),
        release: Some(concat!("sheethook@", env!("CARGO_PKG_VERSION")).into()),
        attach_stacktrace: true,
        ..Default::default()
    })
}
