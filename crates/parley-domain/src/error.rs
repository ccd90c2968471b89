//! Validation errors raised while constructing domain values

use thiserror::Error;

/// Errors raised by domain constructors and pre-flight checks
///
/// These are always local: a request that fails validation is never sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// An adjustment value fell outside [0, 100]
    #[error("{field} must be within 0..=100, got {value}")]
    OutOfRange {
        /// Name of the offending adjustment
        field: &'static str,
        /// The rejected value, as supplied
        value: String,
    },

    /// A required adjustment was not supplied
    #[error("{field} is required")]
    Missing {
        /// Name of the missing adjustment
        field: &'static str,
    },

    /// An adjustment was supplied but is not an integer
    #[error("{field} must be an integer, got {value}")]
    NotNumeric {
        /// Name of the offending adjustment
        field: &'static str,
        /// The rejected value, as supplied
        value: String,
    },

    /// The input message is empty after trimming whitespace
    #[error("input text is empty")]
    EmptyInput,

    /// The input message exceeds the configured maximum
    #[error("input text too long: {len} chars (max: {max})")]
    InputTooLong {
        /// Length of the input in chars
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// The domain label did not match any known conflict domain
    #[error("unknown conflict domain: {0}")]
    UnknownDomain(String),

    /// A confidence score could not be represented
    #[error("confidence must be a finite number in [0.0, 1.0], got {0}")]
    InvalidConfidence(f64),
}
