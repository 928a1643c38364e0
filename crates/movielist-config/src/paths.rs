use anyhow::Result;
use std::path::PathBuf;

/// Overrides the platform config directory (useful for tests and containers).
pub const HOME_ENV: &str = "MYMOVIELIST_HOME";

pub struct PathManager {
    config_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("mymovielist");
        Ok(Self::with_base(base_dir))
    }

    pub fn with_base(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: base_dir.into(),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn session_file(&self) -> PathBuf {
        self.config_dir.join("session.toml")
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Ok(home) = std::env::var(HOME_ENV) {
            if !home.trim().is_empty() {
                return Self::with_base(home);
            }
        }

        // e.g. ~/.config/mymovielist on Linux; fall back to the working directory
        Self::new().unwrap_or_else(|_| Self::with_base(".mymovielist"))
    }
}
