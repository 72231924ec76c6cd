//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use quiz_core::{AbbreviationMode, QuizSettings};
use thiserror::Error;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_ASSETS_DIR: &str = "assets";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Front-end configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the word service.
    pub api_url: String,
    pub api_timeout: Duration,
    /// Directory holding `images/` and `audios/`.
    pub assets_dir: PathBuf,
    /// Command used to play audio files, e.g. `mpg123 -q`.
    pub audio_cmd: Option<String>,
    pub quiz: QuizSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            audio_cmd: None,
            quiz: QuizSettings::default(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Env vars:
    /// - VOCAB_API_URL: word service base URL
    /// - VOCAB_API_TIMEOUT_SECS: request timeout in seconds
    /// - VOCAB_ASSETS_DIR: media directory
    /// - VOCAB_AUDIO_CMD: audio player command
    /// - VOCAB_ABBREVIATIONS: `literal` or `word_boundary`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("VOCAB_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }

        if let Some(value) = lookup("VOCAB_API_TIMEOUT_SECS") {
            let secs = value.parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "VOCAB_API_TIMEOUT_SECS",
                value: value.clone(),
            })?;
            config.api_timeout = Duration::from_secs(secs);
        }

        if let Some(dir) = lookup("VOCAB_ASSETS_DIR") {
            config.assets_dir = PathBuf::from(dir);
        }

        config.audio_cmd = lookup("VOCAB_AUDIO_CMD").filter(|cmd| !cmd.trim().is_empty());

        if let Some(value) = lookup("VOCAB_ABBREVIATIONS") {
            config.quiz.abbreviation_mode =
                AbbreviationMode::from_str(&value).ok_or(ConfigError::Invalid {
                    name: "VOCAB_ABBREVIATIONS",
                    value,
                })?;
        }

        Ok(config)
    }
}
