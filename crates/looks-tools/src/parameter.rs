//! The closed set of adjustable parameters.

use crate::ToolError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An adjustable parameter.
///
/// Adding a variant forces a curve for it in
/// [`ParameterTable::default`](crate::ParameterTable::default) and a field in
/// every tool that exposes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    /// Additive brightness.
    Brightness,
    /// Contrast around mid-gray.
    Contrast,
    /// Color saturation.
    Saturation,
    /// Color temperature of the assumed source light.
    Warmth,
}

impl Parameter {
    /// All parameters in display order.
    pub const ALL: [Parameter; 4] = [
        Self::Brightness,
        Self::Contrast,
        Self::Saturation,
        Self::Warmth,
    ];

    /// Lowercase identifier used in configuration files.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::Warmth => "warmth",
        }
    }

    /// Capitalized name for display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Brightness => "Brightness",
            Self::Contrast => "Contrast",
            Self::Saturation => "Saturation",
            Self::Warmth => "Warmth",
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Parameter {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| ToolError::UnknownParameter(s.to_string()))
    }
}
