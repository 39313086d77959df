//! Saturation, brightness and contrast.
//!
//! Per pixel, in this order:
//!
//! ```text
//! out = luma + saturation * (in - luma)     (color layouts only)
//! out = out + brightness
//! out = (out - 0.5) * contrast + 0.5
//! ```
//!
//! Alpha is passed through. On gray layouts saturation has nothing to act on
//! and is skipped; brightness and contrast still apply.

use crate::filter::require_finite;
use crate::{Filter, FilterResult};
use looks_core::{luminance_rec709, Image};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Midpoint that contrast pivots around.
pub const CONTRAST_PIVOT: f32 = 0.5;

/// Saturation, brightness and contrast controls.
///
/// The neutral setting is `saturation = 1`, `brightness = 0`,
/// `contrast = 1`, which is also the default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorControls {
    /// Saturation multiplier (0 = grayscale, 1 = unchanged).
    pub saturation: f32,
    /// Additive offset (0 = unchanged).
    pub brightness: f32,
    /// Slope around [`CONTRAST_PIVOT`] (1 = unchanged).
    pub contrast: f32,
}

impl Default for ColorControls {
    fn default() -> Self {
        Self {
            saturation: 1.0,
            brightness: 0.0,
            contrast: 1.0,
        }
    }
}

impl ColorControls {
    const NAME: &'static str = "ColorControls";

    /// Apply to an RGB triple.
    #[inline]
    pub fn apply_rgb(&self, rgb: [f32; 3]) -> [f32; 3] {
        let luma = luminance_rec709(rgb);
        rgb.map(|c| self.tone(luma + self.saturation * (c - luma)))
    }

    /// Brightness then contrast on one sample.
    #[inline]
    fn tone(&self, v: f32) -> f32 {
        (v + self.brightness - CONTRAST_PIVOT) * self.contrast + CONTRAST_PIVOT
    }
}

impl Filter for ColorControls {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, image: &Image) -> FilterResult<Image> {
        require_finite(Self::NAME, "saturation", self.saturation)?;
        require_finite(Self::NAME, "brightness", self.brightness)?;
        require_finite(Self::NAME, "contrast", self.contrast)?;
        trace!(
            saturation = self.saturation,
            brightness = self.brightness,
            contrast = self.contrast,
            "ColorControls::apply"
        );

        let layout = image.layout();
        if layout.has_color() {
            Ok(image.map_pixels(|px| {
                let out = self.apply_rgb([px[0], px[1], px[2]]);
                px[..3].copy_from_slice(&out);
            }))
        } else {
            Ok(image.map_pixels(|px| px[0] = self.tone(px[0])))
        }
    }

    fn is_identity(&self) -> bool {
        self.saturation == 1.0 && self.brightness == 0.0 && self.contrast == 1.0
    }
}
