//! Per-event routing: tab name → webhook URL → format → send.
//!
//! [`EventRouter`] holds no state across invocations. A tab missing from
//! the [`WebhookMap`] is a logged no-op, never an error.

use std::sync::Arc;

use super::dispatch::{self, DeliveryOutcome, Transport};
use super::event::SubmissionEvent;
use super::format::format_event;
use crate::config::model::WebhookMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The tab has no webhook; nothing was sent.
    NotConfigured,
    Dispatched(DeliveryOutcome),
}

impl RouteOutcome {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotConfigured => "not_configured",
            Self::Dispatched(outcome) if outcome.is_success() => "delivered",
            Self::Dispatched(_) => "failed",
        }
    }
}

#[derive(Clone)]
pub struct EventRouter {
    webhooks: Arc<WebhookMap>,
    transport: Arc<dyn Transport>,
}

impl EventRouter {
    #[must_use]
    pub fn new(webhooks: Arc<WebhookMap>, transport: Arc<dyn Transport>) -> Self {
        Self {
            webhooks,
            transport,
        }
    }

    #[must_use]
    pub fn webhooks(&self) -> &WebhookMap {
        &self.webhooks
    }

    pub async fn route(&self, event: &SubmissionEvent) -> RouteOutcome {
        let tab = event.sheet.name.as_str();

        let Some(url) = self.webhooks.resolve(tab) else {
            tracing::info!(tab = %tab, "no webhook configured for tab, data not sent");
            return RouteOutcome::NotConfigured;
        };

        let payload = format_event(event);
        let outcome = dispatch::send(self.transport.as_ref(), url, Some(&payload)).await;

        if outcome.is_success() {
            tracing::info!(tab = %tab, url = %url, "submission forwarded");
        } else {
            tracing::warn!(tab = %tab, url = %url, "submission forwarding failed");
        }
        RouteOutcome::Dispatched(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheethookError;
    use crate::forward::dispatch::WebhookResponse;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, serde_json::Value)>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn post_json(&self, url: &str, body: Bytes) -> Result<WebhookResponse, SheethookError> {
            let json = serde_json::from_slice(&body).unwrap();
            self.calls.lock().unwrap().push((url.to_string(), json));
            Ok(WebhookResponse {
                status: hyper::StatusCode::OK,
                body: Bytes::new(),
            })
        }
    }

    fn event(tab: &str) -> SubmissionEvent {
        serde_json::from_value(serde_json::json!({
            "headers": ["Item", "Qty"],
            "named_values": {"Item": ["Widget"], "Qty": ["3"]},
            "sheet": {"name": tab, "id": 42},
            "spreadsheet": {"id": "SSID1", "url": "https://sheets.example/SSID1"}
        }))
        .unwrap()
    }

    fn router(recorder: Arc<Recorder>) -> EventRouter {
        let webhooks: WebhookMap = [("Orders", "https://example.com/hook")].into_iter().collect();
        EventRouter::new(Arc::new(webhooks), recorder)
    }

    #[tokio::test]
    async fn mapped_tab_dispatches_once() {
        let recorder = Arc::new(Recorder::default());
        let outcome = router(recorder.clone()).route(&event("Orders")).await;
        assert_eq!(
            outcome,
            RouteOutcome::Dispatched(DeliveryOutcome::Delivered { status: 200 })
        );
        assert_eq!(outcome.as_str(), "delivered");

        let calls = recorder.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://example.com/hook");
        assert_eq!(
            calls[0].1,
            serde_json::json!({
                "Item": "Widget",
                "Qty": "3",
                "_meta": {
                    "spreadsheet_id": "SSID1",
                    "sheet_name": "Orders",
                    "sheet_id": 42,
                    "spreadsheet_url": "https://sheets.example/SSID1"
                }
            })
        );
    }

    #[tokio::test]
    async fn unmapped_tab_sends_nothing() {
        let recorder = Arc::new(Recorder::default());
        let outcome = router(recorder.clone()).route(&event("Unmapped")).await;
        assert_eq!(outcome, RouteOutcome::NotConfigured);
        assert_eq!(outcome.as_str(), "not_configured");
        assert!(recorder.calls.lock().unwrap().is_empty());
    }
}
