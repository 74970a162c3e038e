//! JSON Configuration Management
//!
//! `AppConfig` is stored as pretty JSON, by default at
//! `~/.mock-interview/config.json`. A missing file is created with defaults.

use std::fs;
use std::path::{Path, PathBuf};

use mock_interview_llm::{LlmRequestOptions, ProviderConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_dir};

/// Environment variable that overrides `provider.api_key`
pub const API_KEY_ENV: &str = "MOCK_INTERVIEW_API_KEY";

/// Sampling parameters for one kind of remote call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestProfile {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl RequestProfile {
    /// Conversational turns: some creativity, short replies
    pub const fn conversation() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1024,
        }
    }

    /// Scoring: low temperature, room for the JSON report
    pub const fn feedback() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 2048,
        }
    }

    pub fn options(&self) -> LlmRequestOptions {
        LlmRequestOptions {
            temperature_override: Some(self.temperature),
            max_tokens_override: Some(self.max_tokens),
        }
    }

    fn validate(&self, name: &str) -> Result<(), String> {
        if self.max_tokens == 0 {
            return Err(format!("{}.maxTokens must be greater than zero", name));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "{}.temperature must be within [0, 2], got {}",
                name, self.temperature
            ));
        }
        Ok(())
    }
}

fn default_conversation() -> RequestProfile {
    RequestProfile::conversation()
}

fn default_feedback() -> RequestProfile {
    RequestProfile::feedback()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Remote chat-completion provider
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Upper bound on a single remote call
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_conversation")]
    pub conversation: RequestProfile,
    #[serde(default = "default_feedback")]
    pub feedback: RequestProfile,
    /// Never call the remote endpoint; every turn comes from the simulator
    #[serde(default)]
    pub offline: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            request_timeout_secs: default_timeout_secs(),
            conversation: default_conversation(),
            feedback: default_feedback(),
            offline: false,
        }
    }
}

impl AppConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_secs == 0 {
            return Err("requestTimeoutSecs must be greater than zero".to_string());
        }
        self.conversation.validate("conversation")?;
        self.feedback.validate("feedback")?;
        Ok(())
    }

    /// Replace the stored API key when `key` is non-blank
    pub fn apply_api_key_override(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.provider.api_key = Some(key);
        }
    }
}

/// Configuration service for loading and saving `AppConfig`.
///
/// The stored config is exactly what is on disk. An API key taken from the
/// environment is kept beside it and only merged into `effective_config`,
/// so `save` never writes it out.
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: AppConfig,
    api_key_override: Option<String>,
}

impl ConfigService {
    /// Load from `path`, or from the default location when `None`.
    /// Writes a default file if none exists. `MOCK_INTERVIEW_API_KEY`
    /// takes precedence over the key on disk.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        Self::load_with_api_key(path, std::env::var(API_KEY_ENV).ok())
    }

    fn load_with_api_key(path: Option<&Path>, api_key: Option<String>) -> AppResult<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => config_path()?,
        };

        let config = if config_path.exists() {
            debug!(path = %config_path.display(), "loading config");
            Self::load_from_file(&config_path)?
        } else {
            if let Some(parent) = config_path.parent() {
                ensure_dir(parent)?;
            }
            let default_config = AppConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            info!(path = %config_path.display(), "wrote default config");
            default_config
        };

        let api_key_override = api_key.filter(|k| !k.trim().is_empty());
        if api_key_override.is_some() {
            debug!(env = API_KEY_ENV, "api key taken from environment");
        }

        Ok(Self {
            config_path,
            config,
            api_key_override,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<AppConfig> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::validation)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    fn save_to_file(path: &Path, config: &AppConfig) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The config as stored on disk
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// The stored config with the environment API key applied
    pub fn effective_config(&self) -> AppConfig {
        let mut config = self.config.clone();
        config.apply_api_key_override(self.api_key_override.clone());
        config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Save the current configuration to disk
    pub fn save(&self) -> AppResult<()> {
        Self::save_to_file(&self.config_path, &self.config)
    }

    /// Reload configuration from disk
    pub fn reload(&mut self) -> AppResult<()> {
        self.config = Self::load_from_file(&self.config_path)?;
        Ok(())
    }
}
