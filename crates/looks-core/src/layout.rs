//! Channel layouts.

use std::fmt;

/// Interleaved channel layout of an [`Image`](crate::Image).
///
/// Samples are stored per pixel in the order the name suggests:
/// `Rgba` is `[R G B A R G B A ...]`, `GrayAlpha` is `[Y A Y A ...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelLayout {
    /// Single luma channel.
    Gray,
    /// Luma plus alpha.
    GrayAlpha,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    #[default]
    Rgba,
}

impl PixelLayout {
    /// Number of interleaved samples per pixel.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::GrayAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Returns `true` if the layout carries separate red, green and blue.
    #[inline]
    pub const fn has_color(self) -> bool {
        matches!(self, Self::Rgb | Self::Rgba)
    }

    /// Returns `true` if the last channel is alpha.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::GrayAlpha | Self::Rgba)
    }

    /// Number of channels that carry color (everything but alpha).
    #[inline]
    pub const fn color_channels(self) -> usize {
        if self.has_alpha() {
            self.channels() - 1
        } else {
            self.channels()
        }
    }
}

impl fmt::Display for PixelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gray => "gray",
            Self::GrayAlpha => "gray+alpha",
            Self::Rgb => "rgb",
            Self::Rgba => "rgba",
        })
    }
}
