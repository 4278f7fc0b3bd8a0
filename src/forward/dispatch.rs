//! Single-attempt webhook delivery.
//!
//! [`send`] validates its inputs, serializes the payload, and performs
//! exactly one POST through a [`Transport`]. Nothing here returns an
//! error or panics on a failed delivery: every outcome, including
//! transport failures and non-2xx responses, becomes a
//! [`DeliveryOutcome`] plus a log line. Retrying is left to the caller.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::StatusCode;

use super::format::Payload;
use crate::error::SheethookError;
use crate::server::HttpClient;

/// Status and body returned by a webhook endpoint.
#[derive(Debug, Clone)]
pub struct WebhookResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

// async_trait keeps Transport object-safe for Arc<dyn Transport>.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as `application/json` to `url`.
    async fn post_json(&self, url: &str, body: Bytes) -> Result<WebhookResponse, SheethookError>;
}

/// Pooled hyper client with a fixed per-request timeout.
pub struct HyperTransport {
    client: HttpClient,
    timeout: Duration,
}

impl HyperTransport {
    #[must_use]
    pub const fn new(client: HttpClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl Transport for HyperTransport {
    async fn post_json(&self, url: &str, body: Bytes) -> Result<WebhookResponse, SheethookError> {
        let uri: hyper::Uri =
            url.parse()
                .map_err(|e: hyper::http::uri::InvalidUri| SheethookError::UriParse {
                    source: Box::new(e),
                })?;

        let req = hyper::Request::builder()
            .method(hyper::Method::POST)
            .uri(uri)
            .header(hyper::header::CONTENT_TYPE, "application/json")
            .header(
                hyper::header::USER_AGENT,
                concat!("sheethook/", env!("CARGO_PKG_VERSION")),
            )
            .body(Full::new(body))
            .map_err(|e| SheethookError::HttpRequest {
                source: Box::new(e),
            })?;

        let response = tokio::time::timeout(self.timeout, self.client.request(req))
            .await
            .map_err(|_| SheethookError::HttpRequest {
                source: format!("request timed out after {}ms", self.timeout.as_millis()).into(),
            })?
            .map_err(|e| SheethookError::HttpRequest {
                source: Box::new(e),
            })?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| SheethookError::HttpRequest {
                source: Box::new(e),
            })?
            .to_bytes();

        Ok(WebhookResponse { status, body })
    }
}

/// Why a delivery was skipped before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidDelivery {
    MissingUrl,
    EmptyPayload,
}

impl std::fmt::Display for InvalidDelivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingUrl => f.write_str("webhook URL not provided"),
            Self::EmptyPayload => f.write_str("payload is empty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The endpoint answered 2xx.
    Delivered { status: u16 },
    /// The endpoint answered outside 2xx.
    Rejected { status: u16, body: String },
    /// No response: connection, TLS, timeout or body read failure.
    Transport(String),
    /// Local validation failed; nothing was sent.
    Invalid(InvalidDelivery),
}

impl DeliveryOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Delivered { status } | Self::Rejected { status, .. } => Some(*status),
            Self::Transport(_) | Self::Invalid(_) => None,
        }
    }
}

/// Deliver `payload` to `url` once and classify the result.
#[allow(clippy::cast_possible_truncation)]
pub async fn send(
    transport: &dyn Transport,
    url: &str,
    payload: Option<&Payload>,
) -> DeliveryOutcome {
    if url.is_empty() {
        tracing::error!("webhook URL not provided, delivery skipped");
        return DeliveryOutcome::Invalid(InvalidDelivery::MissingUrl);
    }
    let Some(payload) = payload.filter(|p| !p.is_empty()) else {
        tracing::error!(url = %url, "payload is empty, delivery skipped");
        return DeliveryOutcome::Invalid(InvalidDelivery::EmptyPayload);
    };

    let body = match payload.to_json() {
        Ok(body) => Bytes::from(body),
        Err(e) => {
            tracing::error!(url = %url, error = %e, "failed to serialize payload");
            return DeliveryOutcome::Transport(e.to_string());
        }
    };

    let start = Instant::now();
    let result = transport.post_json(url, body).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(response) => {
            let status = response.status.as_u16();
            let body = String::from_utf8_lossy(&response.body).into_owned();
            tracing::info!(
                url = %url,
                status,
                body = %body,
                latency_ms,
                "webhook responded"
            );
            if response.status.is_success() {
                DeliveryOutcome::Delivered { status }
            } else {
                DeliveryOutcome::Rejected { status, body }
            }
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, latency_ms, "webhook delivery failed");
            DeliveryOutcome::Transport(e.to_string())
        }
    }
}
