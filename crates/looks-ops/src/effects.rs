//! The gallery's photo-effect looks.
//!
//! Each [`PhotoEffect`] expands into a [`CompositeFilter`] named after the
//! effect. [`PhotoEffect::Original`] is the empty pipeline and always leaves
//! the image as it is.
//!
//! | Look | Pipeline |
//! |------|----------|
//! | Original | (none) |
//! | Mono | luma matrix |
//! | Tonal | luma matrix, soft contrast |
//! | Noir | luma matrix, hard contrast |
//! | Fade | desaturate, lifted blacks |
//! | Chrome | saturate, contrast |
//! | Process | cool shadows |
//! | Transfer | warm, saturated |
//! | Instant | warm, lifted, desaturated |
//! | Sepia | sepia matrix |

use crate::{ColorControls, ColorMatrix, CompositeFilter, FilterError};
use std::fmt;
use std::str::FromStr;

/// A fixed gallery look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhotoEffect {
    /// No change.
    Original,
    /// Plain black and white.
    Mono,
    /// Soft black and white.
    Tonal,
    /// High-contrast black and white.
    Noir,
    /// Washed-out, low saturation.
    Fade,
    /// Punchy color and contrast.
    Chrome,
    /// Cool cast in the shadows.
    Process,
    /// Warm vintage transfer.
    Transfer,
    /// Instant-film look.
    Instant,
    /// Brown toning.
    Sepia,
}

impl PhotoEffect {
    /// Every look in gallery order.
    pub const ALL: [PhotoEffect; 10] = [
        Self::Original,
        Self::Mono,
        Self::Tonal,
        Self::Noir,
        Self::Fade,
        Self::Chrome,
        Self::Process,
        Self::Transfer,
        Self::Instant,
        Self::Sepia,
    ];

    /// Display name, also the gallery and cache key.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Original => "Original",
            Self::Mono => "Mono",
            Self::Tonal => "Tonal",
            Self::Noir => "Noir",
            Self::Fade => "Fade",
            Self::Chrome => "Chrome",
            Self::Process => "Process",
            Self::Transfer => "Transfer",
            Self::Instant => "Instant",
            Self::Sepia => "Sepia",
        }
    }

    /// Builds the look's pipeline.
    pub fn filter(self) -> CompositeFilter {
        let pipeline = CompositeFilter::new(self.name());
        match self {
            Self::Original => pipeline,
            Self::Mono => pipeline.then(ColorMatrix::monochrome()),
            Self::Tonal => pipeline.then(ColorMatrix::monochrome()).then(ColorControls {
                contrast: 0.9,
                brightness: 0.02,
                ..ColorControls::default()
            }),
            Self::Noir => pipeline.then(ColorMatrix::monochrome()).then(ColorControls {
                contrast: 1.4,
                brightness: -0.05,
                ..ColorControls::default()
            }),
            Self::Fade => pipeline
                .then(ColorControls {
                    saturation: 0.75,
                    ..ColorControls::default()
                })
                .then(ColorMatrix::scale([0.85; 3]).with_offset([0.08; 3])),
            Self::Chrome => pipeline.then(ColorControls {
                saturation: 1.25,
                contrast: 1.1,
                ..ColorControls::default()
            }),
            Self::Process => pipeline
                .then(ColorMatrix::scale([0.95, 1.0, 1.08]).with_offset([0.0, 0.01, 0.03]))
                .then(ColorControls {
                    contrast: 1.05,
                    ..ColorControls::default()
                }),
            Self::Transfer => pipeline
                .then(ColorMatrix::scale([1.05, 1.0, 0.92]))
                .then(ColorControls {
                    saturation: 1.1,
                    ..ColorControls::default()
                }),
            Self::Instant => pipeline
                .then(ColorMatrix::scale([1.08, 1.02, 0.9]).with_offset([0.03, 0.02, 0.0]))
                .then(ColorControls {
                    saturation: 0.9,
                    ..ColorControls::default()
                }),
            Self::Sepia => pipeline.then(ColorMatrix::sepia().with_clamp()),
        }
    }
}

impl fmt::Display for PhotoEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PhotoEffect {
    type Err = FilterError;

    /// Parses a look name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FilterError::UnknownEffect { name: s.to_string() })
    }
}
