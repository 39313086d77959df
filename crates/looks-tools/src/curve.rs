//! Mapping between normalized slider values and native filter values.
//!
//! Two shapes are supported:
//!
//! - [`Curve::Linear`]: `native = normalized * k`.
//! - [`Curve::Piecewise`]: normalized `0` is the native neutral; each side of
//!   zero is stretched linearly onto its own native span, so the negative end
//!   of the range reaches `native_min` and the positive end `native_max`.
//!
//! Both directions of the piecewise curve go through the same half-selection,
//! so the two halves cannot drift apart.

use serde::{Deserialize, Serialize};

/// A normalized-to-native mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Curve {
    /// Proportional scale.
    Linear {
        /// Native units per normalized unit.
        k: f64,
    },
    /// Two linear halves meeting at a neutral value.
    Piecewise {
        /// Native value at the normalized minimum.
        native_min: f64,
        /// Native value at normalized zero.
        neutral: f64,
        /// Native value at the normalized maximum.
        native_max: f64,
    },
}

impl Curve {
    /// Linear scale constant, if this is a linear curve.
    pub fn scale(&self) -> Option<f64> {
        match *self {
            Self::Linear { k } => Some(k),
            Self::Piecewise { .. } => None,
        }
    }

    /// Maps a normalized value in `[min, max]` to native units.
    ///
    /// The caller clamps first; values outside the range extrapolate.
    pub fn to_native(&self, normalized: f64, min: f64, max: f64) -> f64 {
        match *self {
            Self::Linear { k } => normalized * k,
            Self::Piecewise {
                native_min,
                neutral,
                native_max,
            } => {
                let (bound, span) = half(native_min, neutral, native_max, normalized < 0.0, min, max);
                if bound == 0.0 {
                    neutral
                } else {
                    neutral + normalized / bound * span
                }
            }
        }
    }

    /// Maps a native value back to the normalized scale.
    ///
    /// Piecewise curves saturate at their native ends.
    pub fn to_normalized(&self, native: f64, min: f64, max: f64) -> f64 {
        match *self {
            Self::Linear { k } => native / k,
            Self::Piecewise {
                native_min,
                neutral,
                native_max,
            } => {
                let native = native.clamp(native_min, native_max);
                let (bound, span) = half(native_min, neutral, native_max, native < neutral, min, max);
                if span == 0.0 {
                    0.0
                } else {
                    (native - neutral) / span * bound
                }
            }
        }
    }
}

/// Normalized extent and native span of one half of a piecewise curve.
///
/// The negative half reports its extent as a positive number so both halves
/// read `native = neutral + normalized / bound * span`.
#[inline]
fn half(native_min: f64, neutral: f64, native_max: f64, negative: bool, min: f64, max: f64) -> (f64, f64) {
    if negative {
        (-min, neutral - native_min)
    } else {
        (max, native_max - neutral)
    }
}
