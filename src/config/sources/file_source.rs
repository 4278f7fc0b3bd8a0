//! Generic async file-based config source with SHA256 versioning.
//!
//! [`FileSource`] implements [`ConfigSource`]
//! for any file format by accepting a deserialization function at
//! construction time. It reads the file asynchronously via Tokio,
//! validates the result, and computes a SHA256 hash as the version.

use std::path::PathBuf;

use async_trait::async_trait;

use super::sha256_hex;
use crate::config::model::Config;
use crate::config::validation::validate;
use crate::config::{ConfigSource, ConfigVersion};
use crate::error::SheethookError;

type Deserialize = fn(&str) -> Result<Config, Box<dyn std::error::Error + Send + Sync>>;

pub struct FileSource {
    path: PathBuf,
    name: &'static str,
    deserialize: Deserialize,
}

impl FileSource {
    #[must_use]
    pub fn new(path: PathBuf, name: &'static str, deserialize: Deserialize) -> Self {
        Self {
            path,
            name,
            deserialize,
        }
    }

    async fn read_content(&self) -> Result<String, SheethookError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SheethookError::ConfigFileNotFound {
                    path: self.path.clone(),
                }
            } else {
                SheethookError::Io(e)
            }
        })
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn load(&self) -> Result<(Config, ConfigVersion), SheethookError> {
        let content = self.read_content().await?;

        let config = (self.deserialize)(&content).map_err(|e| SheethookError::ConfigParse {
            path: self.path.display().to_string(),
            source: e,
        })?;

        if let Err(errors) = validate(&config) {
            return Err(SheethookError::ConfigValidation { errors });
        }

        let hash = sha256_hex(content.as_bytes());
        Ok((config, ConfigVersion::Hash(hash)))
    }
}
