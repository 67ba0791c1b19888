//! Application configuration management.
//!
//! This module handles loading the application configuration,
//! which holds the backend origin and the per-request timeout.
//!
//! Configuration is stored at `~/.config/legaldesk/config.json`. The
//! backend origin can be overridden with `LEGALDESK_BACKEND_URL` or the
//! web frontend's `REACT_APP_BACKEND_URL`.

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

/// Application name used for config/cache directory paths
pub const APP_NAME: &str = "legaldesk";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variables checked for the backend origin, in order
const BACKEND_URL_ENV_VARS: [&str; 2] = ["LEGALDESK_BACKEND_URL", "REACT_APP_BACKEND_URL"];

/// Origin used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// HTTP request timeout in seconds.
/// 30s allows for slow uploads while keeping a hung request from stalling the UI.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub backend_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for log files
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Backend origin: environment first, then the config file, then the default.
    pub fn backend_url(&self) -> String {
        let from_env = BACKEND_URL_ENV_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()));
        Self::resolve_backend_url(from_env, self.backend_url.clone())
    }

    fn resolve_backend_url(from_env: Option<String>, from_file: Option<String>) -> String {
        let url = from_env
            .or(from_file.filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        url.trim().trim_end_matches('/').to_string()
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .filter(|&secs| secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }
}
