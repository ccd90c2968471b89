//! Error types for the bridge
//!
//! Every failure leaving the orchestrator is one of five kinds. Nothing
//! unclassified escapes.

use parley_domain::ValidationError;
use parley_llm::LlmError;
use std::fmt;
use thiserror::Error;

/// Message shown to end users regardless of the failure kind
pub const USER_FACING_MESSAGE: &str =
    "Failed to process. The system might be under high load or the input was too ambiguous.";

/// Errors that can occur during a bridge call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// Bad caller input; never sent to the remote service
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The remote call could not complete
    #[error("Network error: {0}")]
    Network(String),

    /// The response body is not parseable as JSON
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The response parsed but a required field is missing, mistyped or empty
    #[error("Schema violation at '{field}': {reason}")]
    SchemaViolation {
        /// Dotted path of the offending field, or `$` for the root
        field: String,
        /// What was wrong with it
        reason: String,
    },

    /// Anything else, wrapped so it cannot escape unclassified
    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Classification label for logging and telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`BridgeError::Validation`]
    Validation,
    /// See [`BridgeError::Network`]
    Network,
    /// See [`BridgeError::MalformedResponse`]
    MalformedResponse,
    /// See [`BridgeError::SchemaViolation`]
    SchemaViolation,
    /// See [`BridgeError::Unknown`]
    Unknown,
}

impl ErrorKind {
    /// Stable snake_case label
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Network => "network",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::SchemaViolation => "schema_violation",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BridgeError {
    /// Shorthand for a schema violation
    pub fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::SchemaViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::Validation(_) => ErrorKind::Validation,
            BridgeError::Network(_) => ErrorKind::Network,
            BridgeError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            BridgeError::SchemaViolation { .. } => ErrorKind::SchemaViolation,
            BridgeError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// The uniform end-user message
    pub fn user_message(&self) -> &'static str {
        USER_FACING_MESSAGE
    }
}

impl From<LlmError> for BridgeError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Communication(_)
            | LlmError::Http { .. }
            | LlmError::RateLimitExceeded
            | LlmError::ModelNotAvailable(_) => BridgeError::Network(e.to_string()),
            LlmError::InvalidResponse(_) => BridgeError::MalformedResponse(e.to_string()),
            LlmError::MissingCredential(_) | LlmError::Blocked(_) | LlmError::Other(_) => {
                BridgeError::Unknown(e.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        BridgeError::MalformedResponse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_classification() {
        let cases = [
            (LlmError::Communication("refused".into()), ErrorKind::Network),
            (
                LlmError::Http {
                    status: 503,
                    body: "overloaded".into(),
                },
                ErrorKind::Network,
            ),
            (LlmError::RateLimitExceeded, ErrorKind::Network),
            (LlmError::ModelNotAvailable("m".into()), ErrorKind::Network),
            (LlmError::InvalidResponse("html".into()), ErrorKind::MalformedResponse),
            (LlmError::MissingCredential("KEY".into()), ErrorKind::Unknown),
            (LlmError::Blocked("SAFETY".into()), ErrorKind::Unknown),
            (LlmError::Other("?".into()), ErrorKind::Unknown),
        ];

        for (llm_error, expected) in cases {
            assert_eq!(BridgeError::from(llm_error).kind(), expected);
        }
    }

    #[test]
    fn test_validation_conversion() {
        let err: BridgeError = ValidationError::EmptyInput.into();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_schema_violation_names_field() {
        let err = BridgeError::schema("reExpression.message", "missing required field");
        assert_eq!(
            err.to_string(),
            "Schema violation at 'reExpression.message': missing required field"
        );
    }

    #[test]
    fn test_user_message_is_uniform() {
        let errors = [
            BridgeError::Network("x".into()),
            BridgeError::MalformedResponse("x".into()),
            BridgeError::schema("literal", "empty"),
            BridgeError::Unknown("x".into()),
            BridgeError::Validation(ValidationError::EmptyInput),
        ];
        for err in errors {
            assert_eq!(err.user_message(), USER_FACING_MESSAGE);
        }
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ErrorKind::MalformedResponse.to_string(), "malformed_response");
        assert_eq!(ErrorKind::SchemaViolation.as_str(), "schema_violation");
    }
}
