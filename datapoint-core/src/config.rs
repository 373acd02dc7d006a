use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::client::{DataPointClient, DataPointClientBuilder};

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "DATAPOINT_API_KEY";

/// Settings stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_uri = "http://datapoint.metoffice.gov.uk/public/data/"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,

    /// Overrides the public DataPoint endpoint, e.g. to go through a proxy.
    pub base_uri: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("uk", "datapoint", "datapoint-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replaces the stored key when `key` is set and non-blank.
    pub fn override_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Applies [`API_KEY_ENV`] on top of the stored settings.
    pub fn with_env_override(self) -> Self {
        self.override_api_key(std::env::var(API_KEY_ENV).ok())
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Builder seeded with these settings; further options may be layered on.
    pub fn client_builder(&self) -> Result<DataPointClientBuilder> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No DataPoint API key configured.\n\
                 Hint: run `datapoint configure` or set {API_KEY_ENV}."
            )
        })?;

        let mut builder = DataPointClient::builder().api_key(api_key);
        if let Some(uri) = &self.base_uri {
            builder = builder.base_uri(uri.as_str());
        }

        Ok(builder)
    }

    pub fn client(&self) -> Result<DataPointClient> {
        self.client_builder()?
            .build()
            .context("Failed to build DataPoint client")
    }
}
