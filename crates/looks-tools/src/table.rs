//! Per-parameter bounds and curves.
//!
//! A [`ParameterTable`] holds exactly one [`ParameterSpec`] per [`Parameter`].
//! Tables are validated when they are built, whether from code
//! ([`ParameterTable::from_specs`]) or from YAML:
//!
//! ```yaml
//! brightness: { min: -100, max: 100, curve: { kind: linear, k: 0.01 } }
//! contrast:
//!   min: -100
//!   max: 100
//!   curve: { kind: piecewise, native_min: 0, neutral: 1, native_max: 2 }
//! saturation: { min: 0, max: 200, curve: { kind: linear, k: 0.01 } }
//! warmth: { min: 0, max: 100, curve: { kind: linear, k: 65 } }
//! ```

use crate::{Curve, Parameter, ToolError, ToolResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Normalized range and curve for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Lowest normalized value.
    pub min: f64,
    /// Highest normalized value.
    pub max: f64,
    /// Mapping onto native filter units.
    pub curve: Curve,
}

impl ParameterSpec {
    /// Linear spec.
    pub const fn linear(min: f64, max: f64, k: f64) -> Self {
        Self {
            min,
            max,
            curve: Curve::Linear { k },
        }
    }

    /// Piecewise spec around a neutral native value.
    pub const fn piecewise(min: f64, max: f64, native_min: f64, neutral: f64, native_max: f64) -> Self {
        Self {
            min,
            max,
            curve: Curve::Piecewise {
                native_min,
                neutral,
                native_max,
            },
        }
    }

    /// Clamps a normalized value into `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Clamps and maps a normalized value to native units.
    pub fn to_native(&self, value: f64) -> f64 {
        self.curve.to_native(self.clamp(value), self.min, self.max)
    }

    /// Maps a native value to the normalized scale.
    pub fn to_normalized(&self, native: f64) -> f64 {
        self.curve.to_normalized(native, self.min, self.max)
    }

    /// Starting normalized value for a filter whose identity sits at
    /// `identity_native`.
    ///
    /// Piecewise curves start at their neutral point `0`. Linear curves start
    /// at the identity, clamped into `[min, max]` when the table's range
    /// cannot reach it.
    pub fn default_value(&self, identity_native: f64) -> f64 {
        match self.curve {
            Curve::Piecewise { .. } => 0.0,
            Curve::Linear { .. } => self.clamp(self.to_normalized(identity_native)),
        }
    }

    /// Checks the spec for `parameter`.
    pub fn validate(&self, parameter: Parameter) -> ToolResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(ToolError::InvalidDomain {
                parameter,
                min: self.min,
                max: self.max,
            });
        }
        match self.curve {
            Curve::Linear { k } => {
                if k == 0.0 || !k.is_finite() {
                    return Err(ToolError::InvalidScale { parameter, k });
                }
            }
            Curve::Piecewise {
                native_min,
                neutral,
                native_max,
            } => {
                let invalid = |reason: String| ToolError::InvalidCurve { parameter, reason };
                if ![native_min, neutral, native_max].iter().all(|v| v.is_finite()) {
                    return Err(invalid("native values must be finite".into()));
                }
                if !(native_min <= neutral && neutral <= native_max) || native_min == native_max {
                    return Err(invalid(format!(
                        "expected native_min <= neutral <= native_max, got {native_min} / {neutral} / {native_max}"
                    )));
                }
                if self.min > 0.0 || self.max < 0.0 {
                    return Err(invalid(format!(
                        "range [{}, {}] must contain the neutral point 0",
                        self.min, self.max
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A complete, validated set of parameter specs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Parameter, ParameterSpec>",
    into = "BTreeMap<Parameter, ParameterSpec>"
)]
pub struct ParameterTable {
    specs: [ParameterSpec; Parameter::ALL.len()],
}

impl Default for ParameterTable {
    /// Brightness and saturation scale by `0.01`, contrast pivots on `1.0`
    /// and warmth covers `0..=6500` kelvin.
    fn default() -> Self {
        let spec = |p: Parameter| match p {
            Parameter::Brightness => ParameterSpec::linear(-100.0, 100.0, 0.01),
            Parameter::Contrast => ParameterSpec::piecewise(-100.0, 100.0, 0.0, 1.0, 2.0),
            Parameter::Saturation => ParameterSpec::linear(0.0, 200.0, 0.01),
            Parameter::Warmth => ParameterSpec::linear(0.0, 100.0, 65.0),
        };
        Self {
            specs: Parameter::ALL.map(spec),
        }
    }
}

impl ParameterTable {
    /// Builds a table from a map that must cover every parameter.
    pub fn from_specs(mut specs: BTreeMap<Parameter, ParameterSpec>) -> ToolResult<Self> {
        let mut table = Self::default();
        for p in Parameter::ALL {
            let spec = specs.remove(&p).ok_or(ToolError::MissingParameter(p))?;
            table.specs[p.index()] = spec;
        }
        table.validate()?;
        debug!("parameter table validated");
        Ok(table)
    }

    /// Re-checks every spec. Tables built through this crate always pass.
    pub fn validate(&self) -> ToolResult<()> {
        for p in Parameter::ALL {
            self.spec(p).validate(p)?;
        }
        Ok(())
    }

    /// Spec for a parameter.
    #[inline]
    pub fn spec(&self, parameter: Parameter) -> &ParameterSpec {
        &self.specs[parameter.index()]
    }

    /// Iterates `(parameter, spec)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Parameter, &ParameterSpec)> {
        Parameter::ALL.into_iter().zip(self.specs.iter())
    }
}

impl TryFrom<BTreeMap<Parameter, ParameterSpec>> for ParameterTable {
    type Error = ToolError;

    fn try_from(specs: BTreeMap<Parameter, ParameterSpec>) -> ToolResult<Self> {
        Self::from_specs(specs)
    }
}

impl From<ParameterTable> for BTreeMap<Parameter, ParameterSpec> {
    fn from(table: ParameterTable) -> Self {
        table.iter().map(|(p, s)| (p, *s)).collect()
    }
}
