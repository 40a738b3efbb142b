use serde::Deserialize;

use crate::application::services::DEFAULT_THRESHOLD;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub vlm: VlmSettings,
    pub corpus: CorpusSettings,
    pub matching: MatchingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VlmSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusSettings {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    pub threshold: f64,
}

impl Settings {
    /// Assembles settings from environment variables with local-dev defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| SettingsError::InvalidPort(raw.clone()))?,
            Err(_) => 8000,
        };

        let threshold = match std::env::var("MATCH_THRESHOLD") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| SettingsError::InvalidThreshold(raw.clone()))?,
            Err(_) => DEFAULT_THRESHOLD,
        };
        if !(0.0..=100.0).contains(&threshold) {
            return Err(SettingsError::InvalidThreshold(threshold.to_string()));
        }

        Ok(Self {
            server: ServerSettings {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
            },
            vlm: VlmSettings {
                base_url: std::env::var("VLM_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:1234".to_string()),
                model: std::env::var("VLM_MODEL")
                    .unwrap_or_else(|_| "qwen2.5-vl-7b-instruct".to_string()),
                api_key: std::env::var("VLM_API_KEY").unwrap_or_default(),
            },
            corpus: CorpusSettings {
                path: std::env::var("CORPUS_PATH").unwrap_or_else(|_| "medicines.csv".to_string()),
            },
            matching: MatchingSettings { threshold },
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("SERVER_PORT is not a valid port number: {0}")]
    InvalidPort(String),
    #[error("MATCH_THRESHOLD must be a number in [0, 100], got: {0}")]
    InvalidThreshold(String),
}
