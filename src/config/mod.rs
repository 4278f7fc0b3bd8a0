//! Configuration loading and validation.
//!
//! Defines the [`ConfigSource`] trait for pluggable config backends and
//! the [`ConfigVersion`] enum reported by the health endpoint. The
//! config is loaded once per process and never rewritten afterwards.
//! Submodules provide the data model, validation logic, and concrete
//! file sources.

pub mod model;
pub mod sources;
pub mod validation;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::SheethookError;
use model::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigVersion {
    Hash(String),
}

impl ConfigVersion {
    /// First 8 characters of the version, for display.
    #[must_use]
    pub fn short(&self) -> &str {
        match self {
            Self::Hash(h) => h.get(..8).unwrap_or(h),
        }
    }
}

// async_trait is required here because ConfigSource is used as Box<dyn ConfigSource>
// and native async fn in traits (Rust 1.75+) does not support dyn dispatch.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> Result<(Config, ConfigVersion), SheethookError>;
}

/// A config loaded from a source, with the metadata reported by `/health`.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub version: ConfigVersion,
    pub source_name: String,
}

/// Resolve the config file (explicit path or auto-detected) and load it.
pub async fn load(explicit: Option<&Path>) -> Result<LoadedConfig, SheethookError> {
    let Some(source) = resolve_file_source(explicit).await? else {
        return Err(SheethookError::NoConfigSource {
            hint: "Provide --config <file> or create ./sheethook.yaml.\n  \
                   Run 'sheethook init' to create a config file."
                .into(),
        });
    };

    let (config, version) = source.load().await?;
    tracing::debug!(
        source = source.name(),
        tabs = config.webhooks.len(),
        version = version.short(),
        "config loaded"
    );

    Ok(LoadedConfig {
        config,
        version,
        source_name: source.name().to_string(),
    })
}

async fn resolve_file_source(
    explicit: Option<&Path>,
) -> Result<Option<Box<dyn ConfigSource>>, SheethookError> {
    if let Some(path) = explicit {
        return create_file_source(path).map(Some);
    }

    // Auto-detect in current directory
    let candidates = [
        "sheethook.yaml",
        "sheethook.yml",
        "sheethook.json",
        "sheethook.toml",
    ];

    for name in &candidates {
        let path = PathBuf::from(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "auto-detected config file");
            return create_file_source(&path).map(Some);
        }
    }

    Ok(None)
}

fn create_file_source(path: &Path) -> Result<Box<dyn ConfigSource>, SheethookError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Ok(Box::new(sources::yaml(path.to_path_buf()))),

        #[cfg(feature = "json")]
        "json" => Ok(Box::new(sources::json(path.to_path_buf()))),

        #[cfg(feature = "toml")]
        "toml" => Ok(Box::new(sources::toml(path.to_path_buf()))),

        other => Err(SheethookError::UnsupportedFormat(other.to_string())),
    }
}
