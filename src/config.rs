//! Game configuration: engine bounds and LLM settings.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Bounds consumed by the engine at construction.
///
/// All three must be positive; the engine refuses to start otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum full cycles before the game is exhausted.
    #[serde(default = "default_max_turns")]
    max_turns: u32,
    /// Word bound for the secret the host commits to.
    #[serde(default = "default_max_words")]
    max_secret_words: u32,
    /// Word bound for each guess.
    #[serde(default = "default_max_words")]
    max_guess_words: u32,
}

fn default_max_turns() -> u32 {
    20
}

fn default_max_words() -> u32 {
    2
}

impl EngineConfig {
    /// Creates an engine configuration. Validity is checked by the engine,
    /// not here, so a config file can be loaded before being rejected.
    pub fn new(max_turns: u32, max_secret_words: u32, max_guess_words: u32) -> Self {
        Self {
            max_turns,
            max_secret_words,
            max_guess_words,
        }
    }

    /// Maximum full cycles.
    pub fn max_turns(&self) -> u32 {
        self.max_turns
    }

    /// Word bound for the secret.
    pub fn max_secret_words(&self) -> u32 {
        self.max_secret_words
    }

    /// Word bound for each guess.
    pub fn max_guess_words(&self) -> u32 {
        self.max_guess_words
    }

    /// Checks that every bound is positive.
    #[instrument]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_turns == 0 {
            return Err(ConfigError::new("max_turns must be positive".to_string()));
        }
        if self.max_secret_words == 0 {
            return Err(ConfigError::new(
                "max_secret_words must be positive".to_string(),
            ));
        }
        if self.max_guess_words == 0 {
            return Err(ConfigError::new(
                "max_guess_words must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(default_max_turns(), default_max_words(), default_max_words())
    }
}

/// LLM backend settings for the production oracle.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (openai or anthropic).
    #[serde(default = "default_provider")]
    provider: LlmProvider,
    /// Model name (e.g. "gpt-4o", "claude-3-5-haiku-20241022").
    #[serde(default = "default_model")]
    model: String,
    /// Maximum tokens per completion.
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    temperature: f32,
}

fn default_provider() -> LlmProvider {
    LlmProvider::OpenAI
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_tokens() -> u32 {
    150
}

fn default_temperature() -> f32 {
    1.0
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl LlmSettings {
    /// Creates LLM client configuration from these settings.
    /// Requires OPENAI_API_KEY or ANTHROPIC_API_KEY in the environment.
    #[instrument(skip(self), fields(provider = ?self.provider, model = %self.model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");

        let api_key = match self.provider {
            LlmProvider::OpenAI => std::env::var("OPENAI_API_KEY").map_err(|_| {
                ConfigError::new("OPENAI_API_KEY environment variable not set".to_string())
            })?,
            LlmProvider::Anthropic => std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
                ConfigError::new("ANTHROPIC_API_KEY environment variable not set".to_string())
            })?,
        };

        Ok(LlmConfig::new(
            self.provider,
            api_key,
            self.model.clone(),
            self.max_tokens,
            self.temperature,
        ))
    }
}

/// Top-level configuration: engine bounds plus LLM settings.
#[derive(Debug, Clone, Default, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Engine bounds.
    #[serde(default)]
    engine: EngineConfig,
    /// LLM backend settings.
    #[serde(default)]
    llm: LlmSettings,
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(model = %config.llm.model(), "Config loaded successfully");
        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error, capturing the caller location.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
