//! User adjustments - the three tuning sliders

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Lowest accepted slider value
pub const ADJUSTMENT_MIN: i64 = 0;

/// Highest accepted slider value
pub const ADJUSTMENT_MAX: i64 = 100;

/// Field names, in the order they are rendered
pub const ADJUSTMENT_FIELDS: [&str; 3] = ["intensity", "formality", "directness"];

/// Three independent sliders, each within [0, 100]
///
/// All three are always present. Values can only be obtained through the
/// validating constructors, so an instance is always in range.
///
/// # Examples
///
/// ```
/// use parley_domain::UserAdjustments;
///
/// let adj = UserAdjustments::new(30, 70, 50).unwrap();
/// assert_eq!(adj.formality(), 70);
///
/// assert!(UserAdjustments::new(30, 101, 50).is_err());
/// assert_eq!(UserAdjustments::clamped(-5, 140, 50).intensity(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAdjustments")]
pub struct UserAdjustments {
    intensity: u8,
    formality: u8,
    directness: u8,
}

#[derive(Deserialize)]
struct RawAdjustments {
    intensity: i64,
    formality: i64,
    directness: i64,
}

impl TryFrom<RawAdjustments> for UserAdjustments {
    type Error = ValidationError;

    fn try_from(raw: RawAdjustments) -> Result<Self, Self::Error> {
        Self::new(raw.intensity, raw.formality, raw.directness)
    }
}

impl UserAdjustments {
    /// Create adjustments, rejecting any value outside [0, 100]
    ///
    /// # Errors
    /// Returns `ValidationError::OutOfRange` naming the first offending field
    pub fn new(intensity: i64, formality: i64, directness: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            intensity: check_range("intensity", intensity)?,
            formality: check_range("formality", formality)?,
            directness: check_range("directness", directness)?,
        })
    }

    /// Create adjustments, pulling each value into [0, 100]
    pub fn clamped(intensity: i64, formality: i64, directness: i64) -> Self {
        let clamp = |v: i64| v.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX) as u8;
        Self {
            intensity: clamp(intensity),
            formality: clamp(formality),
            directness: clamp(directness),
        }
    }

    /// Create adjustments from loosely typed `(name, value)` pairs
    ///
    /// Intended for callers whose values come from forms or untyped JSON.
    /// Unknown names are ignored.
    ///
    /// # Errors
    /// - `Missing` if a field is absent or `None`
    /// - `NotNumeric` if a value is NaN, infinite, or has a fractional part
    /// - `OutOfRange` if a value is outside [0, 100]
    pub fn from_values(values: &[(&str, Option<f64>)]) -> Result<Self, ValidationError> {
        let lookup = |field: &'static str| -> Result<i64, ValidationError> {
            let value = values
                .iter()
                .find(|(name, _)| *name == field)
                .and_then(|(_, v)| *v)
                .ok_or(ValidationError::Missing { field })?;

            if !value.is_finite() || value.fract() != 0.0 {
                return Err(ValidationError::NotNumeric {
                    field,
                    value: value.to_string(),
                });
            }
            if value < ADJUSTMENT_MIN as f64 || value > ADJUSTMENT_MAX as f64 {
                return Err(ValidationError::OutOfRange {
                    field,
                    value: value.to_string(),
                });
            }
            Ok(value as i64)
        };

        let [intensity, formality, directness] = ADJUSTMENT_FIELDS;
        Self::new(lookup(intensity)?, lookup(formality)?, lookup(directness)?)
    }

    /// Target emotional intensity (lower = calmer, higher = closer to original heat)
    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    /// Target formality
    pub fn formality(&self) -> u8 {
        self.formality
    }

    /// Target directness
    pub fn directness(&self) -> u8 {
        self.directness
    }
}

impl Default for UserAdjustments {
    fn default() -> Self {
        Self {
            intensity: 30,
            formality: 70,
            directness: 50,
        }
    }
}

fn check_range(field: &'static str, value: i64) -> Result<u8, ValidationError> {
    if !(ADJUSTMENT_MIN..=ADJUSTMENT_MAX).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            value: value.to_string(),
        });
    }
    Ok(value as u8)
}
