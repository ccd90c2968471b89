//! Configuration management for the CLI.
//!
//! The CLI only ever reads its configuration; a missing file means defaults.

use crate::error::{CliError, Result};
use parley_bridge::BridgeConfig;
use parley_domain::{ConflictDomain, UserAdjustments};
use parley_llm::GeminiConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote service connection
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Orchestrator limits
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// Values used when a flag is omitted
    #[serde(default)]
    pub defaults: Defaults,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Request defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    /// Conflict domain
    #[serde(default)]
    pub domain: ConflictDomain,

    /// Slider values
    #[serde(default)]
    pub adjustments: UserAdjustments,

    /// Deadline for the bridge command (seconds); none means no deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl AppConfig {
    /// Load configuration from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|e| {
                    CliError::Config(format!("Cannot read {}: {}", path.display(), e))
                })?;
                Self::from_toml(&contents)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.gemini
            .validate()
            .map_err(|e| CliError::Config(format!("[gemini] {}", e)))?;
        self.bridge
            .validate()
            .map_err(|e| CliError::Config(format!("[bridge] {}", e)))?;
        if self.defaults.timeout_secs == Some(0) {
            return Err(CliError::Config(
                "[defaults] timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.defaults.domain, ConflictDomain::International);
        assert_eq!(config.defaults.adjustments.intensity(), 30);
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_no_path_means_defaults() {
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml(
            r#"
            [gemini]
            model = "gemini-2.5-flash"

            [defaults]
            domain = "media"
            adjustments = { intensity = 10, formality = 90, directness = 40 }
            timeout_secs = 30

            [settings]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.defaults.domain, ConflictDomain::Media);
        assert_eq!(config.defaults.adjustments.formality(), 90);
        assert_eq!(config.defaults.timeout_secs, Some(30));
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.bridge, BridgeConfig::default());
    }

    #[test]
    fn test_out_of_range_adjustment_rejected() {
        let result = AppConfig::from_toml(
            r#"
            [defaults]
            adjustments = { intensity = 10, formality = 190, directness = 40 }
            "#,
        );
        assert!(matches!(result, Err(CliError::Toml(_))));
    }

    #[test]
    fn test_invalid_sections_rejected() {
        let result = AppConfig::from_toml("[bridge]\nmax_input_length = 0\n");
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.starts_with("[bridge]")));

        let result = AppConfig::from_toml("[defaults]\ntimeout_secs = 0\n");
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
