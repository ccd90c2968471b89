//! Confidence score reported by the analysis step

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Threshold above which a score is shown as high confidence
pub const HIGH_CONFIDENCE: f64 = 0.8;

/// Self-reported certainty in [0.0, 1.0]
///
/// Advisory only: an out-of-range score from the remote model is pulled to
/// the nearest bound rather than failing the whole result.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// Create a confidence score, rejecting anything outside [0.0, 1.0]
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::InvalidConfidence(value));
        }
        Ok(Self(value))
    }

    /// Create a confidence score, clamping finite values into [0.0, 1.0]
    ///
    /// # Errors
    /// NaN and infinities cannot be clamped meaningfully and are rejected
    pub fn clamped(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidConfidence(value));
        }
        Ok(Self(value.clamp(0.0, 1.0)))
    }

    /// Raw value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Rounded percentage, for display
    pub fn percent(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }

    /// Whether the score is above the high-confidence threshold
    pub fn is_high(&self) -> bool {
        self.0 > HIGH_CONFIDENCE
    }
}

impl TryFrom<f64> for Confidence {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamping() {
        assert_eq!(Confidence::clamped(1.7).unwrap().value(), 1.0);
        assert_eq!(Confidence::clamped(-0.3).unwrap().value(), 0.0);
        assert_eq!(Confidence::clamped(0.42).unwrap().value(), 0.42);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Confidence::clamped(f64::NAN).is_err());
        assert!(Confidence::clamped(f64::INFINITY).is_err());
        assert!(Confidence::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_strict_new() {
        assert!(Confidence::new(0.0).is_ok());
        assert!(Confidence::new(1.0).is_ok());
        assert!(Confidence::new(1.0001).is_err());
    }

    #[test]
    fn test_percent_and_threshold() {
        let c = Confidence::new(0.856).unwrap();
        assert_eq!(c.percent(), 86);
        assert!(c.is_high());
        assert!(!Confidence::new(0.8).unwrap().is_high());
    }

    #[test]
    fn test_serde_as_plain_number() {
        let c = Confidence::new(0.5).unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "0.5");
        assert!(serde_json::from_str::<Confidence>("1.5").is_err());
    }
}
