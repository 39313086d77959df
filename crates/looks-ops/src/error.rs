//! Error types for filter application.

use looks_core::PixelLayout;
use thiserror::Error;

/// Error type for filter application.
///
/// Cloneable so a single failed render can be handed to every caller that
/// was waiting on it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// The filter cannot process images with this channel layout.
    #[error("{filter}: unsupported input layout '{layout}'")]
    UnsupportedInput {
        /// Name of the rejecting filter.
        filter: String,
        /// Layout of the offending image.
        layout: PixelLayout,
    },

    /// The filter's own state is unusable (e.g. a non-finite gain).
    #[error("{filter}: invalid parameter: {reason}")]
    InvalidParameter {
        /// Name of the rejecting filter.
        filter: String,
        /// What is wrong with the parameter.
        reason: String,
    },

    /// A look name matches no built-in effect.
    #[error("unknown look '{name}'")]
    UnknownEffect {
        /// The name as given.
        name: String,
    },
}

impl FilterError {
    /// Creates a [`FilterError::UnsupportedInput`] error.
    #[inline]
    pub fn unsupported_input(filter: impl Into<String>, layout: PixelLayout) -> Self {
        Self::UnsupportedInput {
            filter: filter.into(),
            layout,
        }
    }

    /// Creates a [`FilterError::InvalidParameter`] error.
    #[inline]
    pub fn invalid_parameter(filter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            filter: filter.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the same request can succeed against another input.
    ///
    /// Unsupported input depends only on the image, so presentation may keep
    /// the previous preview and retry once the base image changes. Invalid
    /// parameters need the filter state fixed first.
    #[inline]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UnsupportedInput { .. })
    }
}

/// Result type for filter application.
pub type FilterResult<T> = Result<T, FilterError>;
