//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands, and their associated argument structs. The operator
//! actions (`config`, `test`, `install-trigger`, `menu`) mirror the
//! workbook menu. Every flag has an environment variable equivalent
//! for container deployments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub const DEFAULT_TRIGGERS_FILE: &str = "sheethook-triggers.json";

#[derive(Parser)]
#[command(
    name = "sheethook",
    version,
    about = "Forwards spreadsheet form submissions to per-tab webhooks",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        sheethook init                         Create a starter config\n  \
        sheethook install-trigger -w book.json Register the form-submit trigger\n  \
        sheethook serve                        Start with ./sheethook.yaml\n  \
        sheethook test -w book.json            Send a test payload for the active tab"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the form-submission endpoint
    Serve(Box<ServeArgs>),

    /// Show the tab → webhook configuration
    Config(ViewArgs),

    /// Send a test payload for the active tab
    Test(TestArgs),

    /// Register the form-submit trigger for a workbook
    InstallTrigger(InstallTriggerArgs),

    /// Interactive menu of operator actions
    Menu(MenuArgs),

    /// Generate a starter config file
    Init(InitArgs),

    /// Validate a config file without starting
    Validate(ValidateArgs),

    /// Check health of a running instance
    Health(HealthArgs),
}

#[derive(Args, Clone)]
pub struct LogArgs {
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        sheethook serve                                   Auto-detect config\n  \
        sheethook serve -c hooks.yaml -p 8080 --pretty    Local dev mode\n  \
        sheethook serve --triggers triggers.json          Only accept workbooks with a trigger")]
pub struct ServeArgs {
    /// Config file path (.yaml, .json, .toml)
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Trigger registry file; when set, events from workbooks without a
    /// form-submit trigger are refused
    #[arg(long, env = "SHEETHOOK_TRIGGERS")]
    pub triggers: Option<PathBuf>,

    #[command(flatten)]
    pub log: LogArgs,

    // -- Observability --
    /// Sentry DSN (enables error tracking)
    #[cfg(feature = "sentry-integration")]
    #[arg(long, env = "SENTRY_DSN", help_heading = "Observability")]
    pub sentry_dsn: Option<String>,

    /// Sentry environment tag
    #[cfg(feature = "sentry-integration")]
    #[arg(long, env = "SENTRY_ENVIRONMENT", help_heading = "Observability")]
    pub sentry_environment: Option<String>,

    // -- Tuning --
    /// Webhook timeout in milliseconds (overrides the config file)
    #[arg(
        long,
        env = "REQUEST_TIMEOUT_MS",
        value_parser = clap::value_parser!(u64).range(1..),
        help_heading = "Tuning"
    )]
    pub timeout: Option<u64>,

    /// Max request body size in bytes
    #[arg(
        long,
        env = "MAX_BODY_SIZE",
        default_value_t = 1_048_576,
        help_heading = "Tuning"
    )]
    pub max_body: usize,
}

#[derive(Args)]
pub struct ViewArgs {
    /// Config file path (.yaml, .json, .toml)
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        sheethook test -w book.json              Active tab of the workbook\n  \
        sheethook test -w book.json -t Orders    A specific tab\n  \
        sheethook test -w book.json --yes        Skip the confirmation")]
pub struct TestArgs {
    /// Config file path (.yaml, .json, .toml)
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Workbook snapshot exported by the host adapter
    #[arg(short, long, env = "SHEETHOOK_WORKBOOK")]
    pub workbook: PathBuf,

    /// Tab to test (defaults to the workbook's active tab)
    #[arg(short, long)]
    pub tab: Option<String>,

    /// Send without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Webhook timeout in milliseconds (overrides the config file)
    #[arg(long, env = "REQUEST_TIMEOUT_MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Args)]
pub struct InstallTriggerArgs {
    /// Workbook snapshot exported by the host adapter
    #[arg(
        short,
        long,
        env = "SHEETHOOK_WORKBOOK",
        required_unless_present = "spreadsheet_id"
    )]
    pub workbook: Option<PathBuf>,

    /// Spreadsheet id, instead of reading it from a workbook snapshot
    #[arg(long, conflicts_with = "workbook")]
    pub spreadsheet_id: Option<String>,

    /// Trigger registry file
    #[arg(long, env = "SHEETHOOK_TRIGGERS", default_value = DEFAULT_TRIGGERS_FILE)]
    pub triggers: PathBuf,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Args)]
pub struct MenuArgs {
    /// Config file path (.yaml, .json, .toml)
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Workbook snapshot exported by the host adapter
    #[arg(short, long, env = "SHEETHOOK_WORKBOOK")]
    pub workbook: PathBuf,

    /// Tab used by the test action (defaults to the workbook's active tab)
    #[arg(short, long)]
    pub tab: Option<String>,

    /// Trigger registry file
    #[arg(long, env = "SHEETHOOK_TRIGGERS", default_value = DEFAULT_TRIGGERS_FILE)]
    pub triggers: PathBuf,

    /// Webhook timeout in milliseconds (overrides the config file)
    #[arg(long, env = "REQUEST_TIMEOUT_MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        sheethook init                          Quick start config (yaml)\n  \
        sheethook init --full                   Documented template\n  \
        sheethook init -f toml -o hooks.toml    TOML format")]
pub struct InitArgs {
    /// Output format
    #[arg(short, long, default_value = "yaml")]
    pub format: ConfigFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include full documentation as comments
    #[arg(long)]
    pub full: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Config file to validate
    #[arg(default_value = "sheethook.yaml")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ValidateFormat,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:3000")]
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ValidateFormat {
    Text,
    Json,
}
