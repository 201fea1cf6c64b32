//! Runtime configuration for the browser.
//!
//! The defaults point at TheMealDB's public v1 API, so most hosts never need
//! a config file. A YAML file can override the base URL (a mirror or a local
//! stub server), the request timeout and the user agent.

use camino::Utf8Path;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
use thiserror::Error;

/// Base URL of TheMealDB public API, free tier.
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Per-request timeout applied by the HTTP transport.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Settings for one [`MealBrowser`](crate::MealBrowser).
///
/// # Examples
///
/// ```
/// use mealdb_browse::BrowserConfig;
///
/// let config = BrowserConfig::from_yaml_str("timeout_secs: 10").unwrap();
/// assert_eq!(config.timeout_secs, 10);
/// assert_eq!(config.base_url, "https://www.themealdb.com/api/json/v1/1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// API root that `categories.php`, `filter.php` and `lookup.php` hang off
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Optional `User-Agent` header value
    pub user_agent: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        BrowserConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl BrowserConfig {
    /// Parses a YAML document. Missing keys take their default values.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: BrowserConfig = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    /// Reads and parses a YAML config file.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Checks the base URL is an absolute http(s) URL and strips any trailing
    /// slashes, so endpoint paths can be appended with a single `/`.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let url =
            Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl(format!("{trimmed}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(format!(
                "{trimmed}: unsupported scheme {}",
                url.scheme()
            )));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
