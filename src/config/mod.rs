use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub openai: OpenAIConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAIConfig {
    /// API key; falls back to the OPENAI_API_KEY environment variable.
    pub api_key: Option<String>,
    /// Override for the API base URL (self-hosted gateways).
    pub api_endpoint: Option<String>,
    pub transcription_model: String,
    pub chat_model: String,
    /// Language hint passed to the transcription endpoint.
    pub language: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory for meeting folders. Defaults to <data_dir>/meetings.
    pub root_dir: Option<PathBuf>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_endpoint: None,
            transcription_model: "whisper-1".to_string(),
            chat_model: "gpt-3.5-turbo-1106".to_string(),
            language: "pt".to_string(),
        }
    }
}

impl OpenAIConfig {
    /// Resolved API key: config value first, then environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Root directory for meeting folders, honoring the config override.
    pub fn meetings_root(&self) -> Result<PathBuf> {
        match &self.storage.root_dir {
            Some(dir) => Ok(dir.clone()),
            None => global::meetings_dir(),
        }
    }

    fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.openai.transcription_model, "whisper-1");
        assert_eq!(config.openai.chat_model, "gpt-3.5-turbo-1106");
        assert_eq!(config.openai.language, "pt");
        assert!(config.storage.root_dir.is_none());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [openai]
            language = "en"
            "#,
        )
        .unwrap();

        assert_eq!(config.openai.language, "en");
        assert_eq!(config.openai.transcription_model, "whisper-1");
    }

    #[test]
    fn test_storage_override() {
        let config: Config = toml::from_str(
            r#"
            [storage]
            root_dir = "/tmp/meetgpt-test"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.meetings_root().unwrap(),
            PathBuf::from("/tmp/meetgpt-test")
        );
    }
}
