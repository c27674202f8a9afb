use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{GRADE_SCALE_MAX, PASS_THRESHOLD};

/// Percentage clamped to [0.0, 100.0].
/// Used for category averages, weighted grades, weights, and pass rates.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Percent(f64);

impl Percent {
    pub const ZERO: Percent = Percent(0.0);
    pub const FULL: Percent = Percent(100.0);

    /// Create a new Percent, clamping to [0.0, 100.0].
    /// Non-finite input collapses to 0 so that a degenerate score set can
    /// never poison a derived row with NaN.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 100.0))
        } else {
            Self(0.0)
        }
    }

    /// Build from an obtained/maximum pair. A non-positive maximum yields 0.
    pub fn from_ratio(obtained: f64, max: f64) -> Self {
        if max > 0.0 {
            Self::new(obtained / max * 100.0)
        } else {
            Self::ZERO
        }
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Project onto the 0–20 grade scale.
    pub fn on_scale_of_20(self) -> GradePoints {
        GradePoints::new(self.0 * GRADE_SCALE_MAX / 100.0)
    }
}

impl Default for Percent {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

impl From<f64> for Percent {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Percent> for f64 {
    fn from(p: Percent) -> Self {
        p.0
    }
}

/// A grade on the platform's 0–20 scale, clamped to [0.0, 20.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct GradePoints(f64);

impl GradePoints {
    /// Create a new GradePoints, clamping to [0.0, 20.0].
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, GRADE_SCALE_MAX))
        } else {
            Self(0.0)
        }
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether this grade meets the passing threshold (11 of 20).
    pub fn is_passing(self) -> bool {
        self.0 >= PASS_THRESHOLD
    }
}

impl Default for GradePoints {
    fn default() -> Self {
        Self(0.0)
    }
}

impl fmt::Display for GradePoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}/20", self.0)
    }
}

impl From<f64> for GradePoints {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<GradePoints> for f64 {
    fn from(g: GradePoints) -> Self {
        g.0
    }
}
