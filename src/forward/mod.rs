//! Form-submission forwarding.
//!
//! The [`form_submit_handler`] function is the HTTP face of the host
//! adapter: it receives a [`SubmissionEvent`](event::SubmissionEvent),
//! checks that the workbook has a form-submit trigger installed, and
//! hands the event to the [`EventRouter`](router::EventRouter).
//! Submodules hold the event contract ([`event`]), payload construction
//! ([`format`]), delivery ([`dispatch`]), and per-event routing
//! ([`router`]).

pub mod dispatch;
pub mod event;
pub mod format;
pub mod router;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::operator::triggers;
use crate::server::AppState;
use event::SubmissionEvent;
use router::RouteOutcome;

#[derive(Debug, Serialize, Deserialize)]
pub struct EventResponse {
    pub status: String,
    pub correlation_id: String,
}

pub async fn form_submit_handler(
    State(state): State<Arc<AppState>>,
    req_headers: HeaderMap,
    Json(event): Json<SubmissionEvent>,
) -> Response {
    let correlation_id = req_headers
        .get("x-correlation-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from);

    tracing::info!(
        correlation_id = %correlation_id,
        spreadsheet_id = %event.spreadsheet.id,
        tab = %event.sheet.name,
        "submission received"
    );

    if let Some(registry) = &state.triggers {
        match triggers::is_installed(registry.as_ref(), &event.spreadsheet.id).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(
                    correlation_id = %correlation_id,
                    spreadsheet_id = %event.spreadsheet.id,
                    "no form-submit trigger installed for workbook"
                );
                return respond(
                    StatusCode::PRECONDITION_FAILED,
                    "no_trigger",
                    correlation_id,
                );
            }
            Err(e) => {
                tracing::error!(
                    correlation_id = %correlation_id,
                    error = %e,
                    "trigger registry lookup failed"
                );
                return respond(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "registry_error",
                    correlation_id,
                );
            }
        }
    }

    // One submission at a time, in arrival order.
    let outcome = {
        let _guard = state.delivery_lock.lock().await;
        state.router.route(&event).await
    };

    let counter = match &outcome {
        RouteOutcome::NotConfigured => &state.stats.not_configured,
        RouteOutcome::Dispatched(d) if d.is_success() => &state.stats.delivered,
        RouteOutcome::Dispatched(_) => &state.stats.failed,
    };
    counter.fetch_add(1, Ordering::Relaxed);

    tracing::info!(
        correlation_id = %correlation_id,
        tab = %event.sheet.name,
        outcome = outcome.as_str(),
        "submission processed"
    );

    respond(StatusCode::OK, outcome.as_str(), correlation_id)
}

fn respond(status: StatusCode, outcome: &str, correlation_id: String) -> Response {
    let header = [("x-correlation-id", correlation_id.clone())];
    (
        status,
        header,
        Json(EventResponse {
            status: outcome.to_string(),
            correlation_id,
        }),
    )
        .into_response()
}
