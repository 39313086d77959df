//! Error types for tools and parameter tables.

use crate::Parameter;
use thiserror::Error;

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors raised while building parameter tables or editing tools.
///
/// Everything except [`ToolError::NotFinite`] is a configuration error and is
/// reported when a [`ParameterTable`](crate::ParameterTable) is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    /// The table has no curve for a parameter.
    #[error("no curve defined for parameter '{0}'")]
    MissingParameter(Parameter),

    /// A linear scale constant is zero or not finite.
    #[error("parameter '{parameter}': scale {k} must be finite and non-zero")]
    InvalidScale {
        /// Affected parameter.
        parameter: Parameter,
        /// Offending scale.
        k: f64,
    },

    /// The normalized bounds are not a finite, non-empty range.
    #[error("parameter '{parameter}': invalid range [{min}, {max}]")]
    InvalidDomain {
        /// Affected parameter.
        parameter: Parameter,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A piecewise curve is not monotonic or does not fit its range.
    #[error("parameter '{parameter}': invalid curve: {reason}")]
    InvalidCurve {
        /// Affected parameter.
        parameter: Parameter,
        /// What is wrong.
        reason: String,
    },

    /// A parameter name did not match any known parameter.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// `set_value` received NaN.
    #[error("parameter '{0}': value is not a number")]
    NotFinite(Parameter),
}

impl ToolError {
    /// Returns `true` for errors that must stop a session from starting.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::NotFinite(_) | Self::UnknownParameter(_))
    }
}
