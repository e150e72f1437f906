// Rust guideline compliant 2026-10-18

//! Configuration management for Roster.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Longest nickname prefix accepted by validation.
pub const MAX_NICKNAME_PREFIX_LEN: usize = 16;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// Human-readable table format.
    #[default]
    Table,
    /// Plain text format.
    Plain,
}

/// Configuration for Roster behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Prefix shown in front of nicknames; stripped once from queries.
    #[serde(default = "default_nickname_prefix")]
    pub nickname_prefix: String,

    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Optional TOML message catalog overriding the built-in messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages_path: Option<PathBuf>,
}

fn default_nickname_prefix() -> String {
    "~".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nickname_prefix: default_nickname_prefix(),
            output_format: OutputFormat::default(),
            messages_path: None,
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `.roster/config.toml`
    /// 3. Environment variables with `ROSTER_` prefix
    ///
    /// # Arguments
    ///
    /// * `roster_dir` - Path to the `.roster` directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(roster_dir: &Path) -> Result<Self> {
        Self::load_with_env(roster_dir, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`], reading overrides through `env` instead of
    /// the process environment.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_with_env<F>(roster_dir: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let config_path = roster_dir.join("config.toml");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| Error::InvalidConfig(format!("Invalid config file: {}", e)))?;
        }

        config.apply_env_overrides(env)?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `ROSTER_NICKNAME_PREFIX` - Nickname prefix
    /// - `ROSTER_OUTPUT_FORMAT` - Output format (json/table/plain)
    /// - `ROSTER_MESSAGES_PATH` - Path to a message catalog
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = env("ROSTER_NICKNAME_PREFIX") {
            self.nickname_prefix = val;
        }

        if let Some(val) = env("ROSTER_OUTPUT_FORMAT") {
            self.output_format = match val.as_str() {
                "json" => OutputFormat::Json,
                "table" => OutputFormat::Table,
                "plain" => OutputFormat::Plain,
                _ => {
                    return Err(Error::InvalidConfig(
                        "ROSTER_OUTPUT_FORMAT must be json, table, or plain".to_string(),
                    ))
                }
            };
        }

        if let Some(val) = env("ROSTER_MESSAGES_PATH") {
            self.messages_path = Some(PathBuf::from(val));
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if the nickname prefix contains whitespace or is
    /// longer than [`MAX_NICKNAME_PREFIX_LEN`] characters.
    fn validate(&self) -> Result<()> {
        if self.nickname_prefix.chars().any(char::is_whitespace) {
            return Err(Error::InvalidConfig(
                "nickname_prefix cannot contain whitespace".to_string(),
            ));
        }

        if self.nickname_prefix.chars().count() > MAX_NICKNAME_PREFIX_LEN {
            return Err(Error::InvalidConfig(format!(
                "nickname_prefix must be at most {} characters, got {}",
                MAX_NICKNAME_PREFIX_LEN,
                self.nickname_prefix.chars().count()
            )));
        }

        Ok(())
    }

    /// Saves the configuration to `config.toml` in `roster_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or written
    /// - Serialization fails
    pub fn save(&self, roster_dir: &Path) -> Result<()> {
        let config_path = roster_dir.join("config.toml");
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}
