//! sheethook forwards spreadsheet form submissions to per-tab webhooks.
//!
//! A host adapter posts each form-submit event to the server. The event
//! is flattened into a JSON payload (one key per column header, plus a
//! `_meta` block describing the spreadsheet and tab) and POSTed to the
//! webhook configured for the tab that received it. Tabs without a
//! webhook are skipped.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (serve, config, test,
//!   install-trigger, menu, init, validate, health).
//! - [`config`] -- Loading and validating the tab → webhook map via the
//!   [`ConfigSource`](config::ConfigSource) trait.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`forward`] -- Event model, payload formatting, webhook delivery and
//!   per-tab routing, plus the `POST /events/form-submit` handler.
//! - [`health`] -- `GET /health` endpoint handler returning runtime diagnostics.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`operator`] -- Operator actions: viewing the configuration, sending
//!   test payloads and installing the form-submit trigger.
//! - [`server`] -- Axum server setup, shared application state, HTTP client, and
//!   graceful shutdown.
//! - [`workbook`] -- Workbook snapshots used by the operator actions.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support |
//! | `toml` | TOML config file support |
//! | `sentry-integration` | Sentry error tracking |
//! | `file-backends` | All file format backends |
//! | `full` | All features |

// Binary crate: public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod forward;
pub mod health;
pub mod logging;
pub mod operator;
pub mod server;
pub mod workbook;

#[cfg(feature = "sentry-integration")]
pub mod sentry_integration;
