//! Confidence scores attached to extracted values

use serde::{Deserialize, Serialize};

/// Confidence score in [0.0, 1.0]
///
/// Construction clamps out-of-range input instead of rejecting it: language
/// models routinely report 1.2 or -0.1, and a clamped score is more useful
/// than a failed extraction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Create a confidence score, clamping into [0.0, 1.0]
    ///
    /// Non-finite input collapses to 0.0.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    /// Get the raw score
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}
