//! Tool and parameter traits.

use crate::{Parameter, ToolResult};
use looks_core::Image;
use looks_ops::{CompositeFilter, Filter, FilterResult};
use std::fmt;

/// Something with normalized, slider-style parameters.
///
/// All values are on the normalized scale described by each parameter's
/// [`ParameterSpec`](crate::ParameterSpec).
pub trait Parameterized {
    /// Parameters this object exposes, in display order.
    fn all_parameters(&self) -> &[Parameter];

    /// Current normalized value.
    fn value(&self, parameter: Parameter) -> f64;

    /// Lowest accepted normalized value.
    fn min_value(&self, parameter: Parameter) -> f64;

    /// Highest accepted normalized value.
    fn max_value(&self, parameter: Parameter) -> f64;

    /// Sets a normalized value, clamping it to `[min_value, max_value]`.
    ///
    /// Returns the value actually applied. NaN is rejected.
    fn set_value(&mut self, value: f64, parameter: Parameter) -> ToolResult<f64>;

    /// Restores every parameter to its default.
    fn reset(&mut self);
}

/// A named, user-facing adjustment.
pub trait Tool: Parameterized + Send + Sync {
    /// Display name.
    fn name(&self) -> &str;

    /// Icon asset reference.
    fn icon(&self) -> &Icon;

    /// Snapshot of the tool's filters as one pipeline.
    fn filter(&self) -> CompositeFilter;

    /// Runs the current pipeline on `image`.
    fn apply(&self, image: &Image) -> FilterResult<Image> {
        self.filter().apply(image)
    }
}

/// Opaque reference to an icon asset, resolved by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Icon(String);

impl Icon {
    /// Creates an icon reference.
    pub fn new(asset: impl Into<String>) -> Self {
        Self(asset.into())
    }

    /// Asset name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
