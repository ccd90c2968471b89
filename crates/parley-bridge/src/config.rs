//! Configuration for the bridge

use serde::{Deserialize, Serialize};

/// Configuration for the bridge orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Maximum input text length (characters)
    pub max_input_length: usize,
}

impl BridgeConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_length == 0 {
            return Err("max_input_length must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_input_length: 50_000,
        }
    }
}

impl BridgeConfig {
    /// Strict preset: short messages only
    pub fn strict() -> Self {
        Self {
            max_input_length: 10_000,
        }
    }

    /// Lenient preset: room for long speech transcripts
    pub fn lenient() -> Self {
        Self {
            max_input_length: 200_000,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
