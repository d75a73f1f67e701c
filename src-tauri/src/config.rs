//! Application configuration loaded from TOML.
//!
//! Looks for `<config_dir>/ecopack/config.toml`; every field is optional
//! and falls back to the defaults below. `ECOPACK_SERVICE_URL` overrides
//! the service location.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::dashboard::DEFAULT_DISPLAY_LIMIT;
use crate::error::{EcoPackError, Result};

pub const APP_DIR: &str = "ecopack";
pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_SERVICE_URL: &str = "ECOPACK_SERVICE_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the prediction service
    pub service_url: String,
    pub request_timeout_secs: u64,
    /// Wait before chart capture so pending draws finish
    pub settle_delay_ms: u64,
    pub rejected_display_limit: usize,
    /// Where exports land; the download dir when unset
    pub export_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 30,
            settle_delay_ms: 500,
            rejected_display_limit: DEFAULT_DISPLAY_LIMIT,
            export_dir: None,
        }
    }
}

/// Read a config file. Missing keys take their defaults.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {:?}", path))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid config at {:?}", path))?;
    Ok(config)
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

impl AppConfig {
    /// Load from the default location and the environment, then validate.
    pub fn load() -> Result<Self> {
        let config = match default_config_path() {
            Some(path) if path.exists() => {
                info!("Loading config from {:?}", path);
                load_config(&path).map_err(|e| EcoPackError::Config(format!("{:#}", e)))?
            }
            _ => AppConfig::default(),
        };

        let config = config.with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply environment-style overrides from `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_SERVICE_URL).filter(|u| !u.trim().is_empty()) {
            self.service_url = url.trim().to_string();
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.service_url).map_err(|e| {
            EcoPackError::Config(format!("Invalid service_url '{}': {}", self.service_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(EcoPackError::Config(format!(
                "service_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.rejected_display_limit == 0 {
            return Err(EcoPackError::Config(
                "rejected_display_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
