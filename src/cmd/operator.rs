//! Shared plumbing for the operator subcommands.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{self, LoadedConfig};
use crate::error::SheethookError;
use crate::forward::dispatch::{HyperTransport, Transport};
use crate::operator::notify::Notifier;
use crate::operator::{send_test_payload, TestOutcome};
use crate::server;
use crate::workbook::Workbook;

pub async fn load_config(path: Option<&Path>) -> Result<LoadedConfig, SheethookError> {
    config::load(path).await
}

/// Webhook transport honoring the config timeout unless overridden.
#[must_use]
pub fn transport(loaded: &LoadedConfig, timeout_override: Option<u64>) -> Arc<dyn Transport> {
    let timeout_ms = timeout_override.unwrap_or(loaded.config.defaults.timeout);
    Arc::new(HyperTransport::new(
        server::build_http_client(),
        Duration::from_millis(timeout_ms),
    ))
}

/// Local time string used by placeholder test payloads.
#[must_use]
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Run the test action for `tab` (or the active tab) of `workbook`.
pub async fn run_test(
    loaded: &LoadedConfig,
    workbook: &Workbook,
    tab: Option<&str>,
    notifier: &dyn Notifier,
    transport: &dyn Transport,
) -> Result<TestOutcome, SheethookError> {
    let sheet = workbook.sheet(tab)?;
    let outcome = send_test_payload(
        &loaded.config.webhooks,
        sheet,
        &workbook.spreadsheet,
        notifier,
        transport,
        &timestamp(),
    )
    .await;

    match outcome {
        TestOutcome::Sent(ref delivery) if !delivery.is_success() => {
            Err(SheethookError::TestDeliveryFailed {
                tab: sheet.name.clone(),
            })
        }
        other => Ok(other),
    }
}
