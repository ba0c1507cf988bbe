//! Publisher configuration.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PublishError, PublishResult};

/// Settings for every registered publisher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    pub twbyor: TwByorConfig,
    pub zalando: ZalandoConfig,
}

impl PublishConfig {
    /// Load a YAML config file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> PublishResult<Self> {
        let path = path.as_ref();
        debug!("Loading publish config from {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| PublishError::io(path, e))?;
        let config: PublishConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Settings for the Thoughtworks "build your own radar" publisher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TwByorConfig {
    /// Host port the preview is published on.
    pub port: u16,
}

impl Default for TwByorConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Settings for the Zalando tech radar publisher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZalandoConfig {
    pub title: String,
    pub repo_url: String,
    /// Shown as the radar version; defaults to the current `YYYY.MM`.
    pub date: Option<String>,
    /// Host port the preview is published on.
    pub port: u16,
}

impl Default for ZalandoConfig {
    fn default() -> Self {
        Self {
            title: "Zalando Tech Radar".to_string(),
            repo_url: "https://github.com/zalando/tech-radar".to_string(),
            date: None,
            port: 8080,
        }
    }
}

impl ZalandoConfig {
    /// Configured date, or the current month.
    pub fn resolved_date(&self) -> String {
        self.date
            .clone()
            .unwrap_or_else(|| Utc::now().format("%Y.%m").to_string())
    }
}
