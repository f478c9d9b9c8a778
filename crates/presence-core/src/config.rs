//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the API base address, the request timeout, and the last
//! visited route.
//!
//! Configuration is stored at `~/.config/presence/config.json`. The
//! `PRESENCE_API_URL` environment variable overrides the base address.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;

/// Application name used for config/data/cache directory paths
pub const APP_NAME: &str = "presence";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the API base address
pub const API_URL_ENV: &str = "PRESENCE_API_URL";

/// HTTP request timeout in seconds when none is configured.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub last_route: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Base address for API requests: environment, then config file, then default.
    pub fn base_url(&self) -> String {
        let from_env = std::env::var(API_URL_ENV).ok();
        Self::resolve_base_url(from_env, self.api_base_url.clone())
    }

    fn resolve_base_url(from_env: Option<String>, from_config: Option<String>) -> String {
        from_env
            .filter(|s| !s.trim().is_empty())
            .or(from_config.filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for durable client state (session, preferences).
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Directory for disposable files such as logs.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_precedence() {
        assert_eq!(
            Config::resolve_base_url(Some("http://env:1".into()), Some("http://cfg:2".into())),
            "http://env:1"
        );
        assert_eq!(
            Config::resolve_base_url(None, Some("http://cfg:2/".into())),
            "http://cfg:2"
        );
        assert_eq!(
            Config::resolve_base_url(Some("  ".into()), None),
            DEFAULT_BASE_URL
        );
    }

    #[test]
    fn test_request_timeout_default() {
        assert_eq!(Config::default().request_timeout(), Duration::from_secs(30));
        let config = Config {
            request_timeout_secs: Some(5),
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }
}
