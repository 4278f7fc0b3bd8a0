//! Operator-invoked actions.
//!
//! These mirror the workbook menu: view the configured webhooks, send a
//! test payload for the active tab, and install the form-submit trigger.
//! Every action reports back through a [`Notifier`](notify::Notifier).

pub mod notify;
pub mod triggers;

use crate::config::model::WebhookMap;
use crate::forward::dispatch::{self, DeliveryOutcome, Transport};
use crate::forward::event::SpreadsheetRef;
use crate::forward::format::build_test_payload;
use crate::workbook::SheetSnapshot;
use notify::{Button, Buttons, Notifier};

const TEST_TITLE: &str = "Webhook test";

/// Text listing every configured tab and its URL.
#[must_use]
pub fn configuration_message(webhooks: &WebhookMap) -> String {
    let mut message = String::from("Webhook configuration per tab (from the config file):\n\n");
    if webhooks.is_empty() {
        message.push_str("No tab has a webhook configured under `webhooks`.");
    } else {
        for (tab, url) in webhooks.iter() {
            message.push_str(&format!("- {tab}: {url}\n"));
        }
    }
    message
}

pub fn view_configuration(webhooks: &WebhookMap, notifier: &dyn Notifier) {
    notifier.notify(
        "Webhook configuration",
        &configuration_message(webhooks),
        Buttons::Ok,
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    /// The tab has no webhook; the operator was told and nothing was sent.
    NotConfigured,
    /// The operator declined to send.
    Cancelled,
    Sent(DeliveryOutcome),
}

/// Send a synthetic payload for `sheet` after the operator confirms.
pub async fn send_test_payload(
    webhooks: &WebhookMap,
    sheet: &SheetSnapshot,
    spreadsheet: &SpreadsheetRef,
    notifier: &dyn Notifier,
    transport: &dyn Transport,
    timestamp: &str,
) -> TestOutcome {
    let Some(url) = webhooks.resolve(&sheet.name) else {
        tracing::info!(tab = %sheet.name, "test requested for tab without webhook");
        notifier.notify(
            TEST_TITLE,
            &format!(
                "No webhook URL is configured for tab \"{}\".\n\
                 Add it under `webhooks` in the config file.",
                sheet.name
            ),
            Buttons::Ok,
        );
        return TestOutcome::NotConfigured;
    };

    let payload = build_test_payload(sheet, spreadsheet, timestamp);

    let answer = notifier.notify(
        TEST_TITLE,
        &format!(
            "Current webhook URL: {url}\n\n\
             Send a test payload to this URL?\n\
             (Spreadsheet details are sent in the '_meta' field)"
        ),
        Buttons::YesNo,
    );

    if answer != Button::Yes {
        notifier.notify(TEST_TITLE, "Test cancelled.", Buttons::Ok);
        return TestOutcome::Cancelled;
    }

    let outcome = dispatch::send(transport, url, Some(&payload)).await;
    if outcome.is_success() {
        notifier.notify(TEST_TITLE, "Test payload sent successfully!", Buttons::Ok);
    } else {
        notifier.notify(
            TEST_TITLE,
            "Sending the test payload failed. Check the log for details.",
            Buttons::Ok,
        );
    }
    TestOutcome::Sent(outcome)
}
