use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub gemini_api_key: Option<String>,
}

impl Config {
    /// Loads the config file, creating a template on first run, then fills
    /// the API key from `GEMINI_API_KEY` if the file left it unset.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Config>(&content)?
        } else {
            let config = Config::default();
            config.save()?;
            config
        };

        if config.gemini_api_key.is_none() {
            config.gemini_api_key = std::env::var("GEMINI_API_KEY").ok();
        }

        Ok(config)
    }

    /// The generation service is the whole point of the tool, so a missing
    /// key refuses startup instead of degrading.
    pub fn require_api_key(&self) -> Result<String> {
        self.gemini_api_key.clone().ok_or_else(|| {
            AppError::Config(format!(
                "Gemini API key not configured. Set gemini_api_key in {} \
                 or export GEMINI_API_KEY.",
                Self::config_path().display()
            ))
        })
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("post-automator")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_refuses_with_config_error() {
        let config = Config {
            gemini_api_key: None,
        };
        assert!(matches!(config.require_api_key(), Err(AppError::Config(_))));
    }

    #[test]
    fn present_key_is_returned() {
        let config = Config {
            gemini_api_key: Some("test-key".to_string()),
        };
        assert_eq!(config.require_api_key().unwrap(), "test-key");
    }
}
