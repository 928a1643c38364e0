use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Overrides `[api] base_url` when set.
pub const BASE_URL_ENV: &str = "MYMOVIELIST_BASE_URL";

/// Application configuration, built once at startup and handed to the API client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Server root, without the `/api` prefix (e.g. `http://127.0.0.1:5000`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout. Unset means the HTTP client's default (no timeout).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Force JSON logs on or off; unset picks JSON when stdout is not a terminal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

impl ApiConfig {
    /// `{base_url}/api`, the prefix every endpoint hangs off.
    pub fn api_root(&self) -> String {
        format!("{}/api", self.base_url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load, apply environment overrides, validate.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = Self::load_or_default(path)?;
        config.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_base_url_override(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(anyhow::anyhow!("api.base_url must not be empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "api.base_url must start with http:// or https://, got {}",
                base_url
            ));
        }
        if self.api.timeout_seconds == Some(0) {
            return Err(anyhow::anyhow!("api.timeout_seconds must be greater than zero"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(anyhow::anyhow!("Invalid logging.level: {}", self.logging.level));
        }

        Ok(())
    }
}
