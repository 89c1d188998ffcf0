//! Configuration handling for the client

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the service address
pub const API_URL_ENV: &str = "FORMDECK_API_URL";

/// Default form service address
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Form service address
    pub api_base_url: Option<String>,
    /// Where completed forms are written
    pub submissions_dir: Option<PathBuf>,
    /// HTTP request timeout
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "formdeck", "formdeck")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Platform data directory, if the platform has one
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from the platform config file, writing a default
    /// file on first run
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            let config = Self::default();
            match config.save_to(&path) {
                Ok(()) => tracing::info!("Wrote default config to {}", path.display()),
                Err(e) => tracing::warn!("Could not write default config: {}", e),
            }
            return Ok(config);
        }
        Self::load_from(&path)
    }

    /// Load configuration from `path`, or defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Service address: environment, then config file, then default
    pub fn api_base_url(&self) -> String {
        self.api_base_url_with(std::env::var(API_URL_ENV).ok())
    }

    fn api_base_url_with(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Submissions directory: config file, then the data directory, then
    /// the working directory
    pub fn submissions_dir(&self) -> PathBuf {
        self.submissions_dir_with(Self::data_dir())
    }

    fn submissions_dir_with(&self, data_dir: Option<PathBuf>) -> PathBuf {
        if let Some(dir) = &self.submissions_dir {
            return dir.clone();
        }
        data_dir
            .map(|dir| dir.join("submissions"))
            .unwrap_or_else(|| PathBuf::from("submissions"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
