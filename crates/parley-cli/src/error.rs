//! Error types for the CLI application.

use parley_bridge::BridgeError;
use parley_llm::LlmError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The provider could not be set up
    #[error("Provider error: {0}")]
    Provider(#[from] LlmError),

    /// A bridge call failed
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CliError {
    /// Text shown to the user on stderr
    ///
    /// Bridge failures all collapse to the same generic sentence; the
    /// detail goes to the log instead.
    pub fn display_message(&self) -> String {
        match self {
            CliError::Bridge(e) => e.user_message().to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_bridge::USER_FACING_MESSAGE;

    #[test]
    fn test_bridge_errors_are_uniform() {
        let network = CliError::from(BridgeError::Network("timeout".into()));
        let schema = CliError::from(BridgeError::schema("confidence", "expected number"));
        assert_eq!(network.display_message(), USER_FACING_MESSAGE);
        assert_eq!(schema.display_message(), USER_FACING_MESSAGE);
    }

    #[test]
    fn test_setup_errors_keep_detail() {
        let err = CliError::from(LlmError::MissingCredential("GEMINI_API_KEY".into()));
        assert!(err.display_message().contains("GEMINI_API_KEY"));
    }
}
