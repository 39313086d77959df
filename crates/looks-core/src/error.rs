//! Error types for looks-core buffer operations.
//!
//! Only construction can fail: once an [`Image`](crate::Image) exists its
//! sample count always matches `width * height * channels`.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building image buffers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid image dimensions.
    ///
    /// Returned when the supplied sample buffer does not match the requested
    /// size, or when the size overflows.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Pixel value has the wrong number of channels for the layout.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Expected channel count
        expected: usize,
        /// Actual channel count
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: usize, got: usize) -> Self {
        Self::ChannelMismatch { expected, got }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_message() {
        let err = Error::invalid_dimensions(0, 10, "zero width");
        let msg = err.to_string();
        assert!(msg.contains("0x10"));
        assert!(msg.contains("zero width"));
    }

    #[test]
    fn test_channel_mismatch_message() {
        let err = Error::channel_mismatch(3, 4);
        assert_eq!(err.to_string(), "channel mismatch: expected 3, got 4");
    }
}
