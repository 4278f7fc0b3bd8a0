//! Concrete [`ConfigSource`](super::ConfigSource) implementations.
//!
//! Provides file-based sources (YAML, JSON, TOML) gated by feature flags
//! and the [`parse_config_str`] helper for format-specific deserialization.

pub mod file_source;

use std::path::PathBuf;

use sha2::{Digest, Sha256};

use file_source::FileSource;

use crate::config::model::Config;
use crate::error::SheethookError;

/// Parse a config string based on file extension.
pub fn parse_config_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<Config, SheethookError> {
    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| SheethookError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(|e| SheethookError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "toml")]
        "toml" => ::toml::from_str(content).map_err(|e| SheethookError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        other => Err(SheethookError::UnsupportedFormat(other.to_string())),
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// YAML config file source.
#[cfg(feature = "yaml")]
#[must_use]
pub fn yaml(path: PathBuf) -> FileSource {
    FileSource::new(path, "yaml", |content| {
        serde_yml::from_str::<Config>(content).map_err(|e| Box::new(e) as BoxError)
    })
}

/// JSON config file source.
#[cfg(feature = "json")]
#[must_use]
pub fn json(path: PathBuf) -> FileSource {
    FileSource::new(path, "json", |content| {
        serde_json::from_str::<Config>(content).map_err(|e| Box::new(e) as BoxError)
    })
}

/// TOML config file source.
#[cfg(feature = "toml")]
#[must_use]
pub fn toml(path: PathBuf) -> FileSource {
    FileSource::new(path, "toml", |content| {
        ::toml::from_str::<Config>(content).map_err(|e| Box::new(e) as BoxError)
    })
}

/// Compute a lowercase hex-encoded SHA-256 digest.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}
