//! White balance from a source neutral to a target neutral.
//!
//! The input neutral describes the light the image was lit by; the target
//! neutral is the light it should look like it was lit by. Each channel is
//! scaled by `white(target) / white(input)`, where `white(K)` is the RGB
//! color of a black body at `K` kelvin. Equal neutrals are the identity.
//!
//! Tint shifts green against magenta: a positive input tint (a magenta cast)
//! is compensated by lifting green.
//!
//! Reference: Tanner Helland's black-body fit.

use crate::filter::{require_color, require_finite};
use crate::{Filter, FilterResult};
use looks_core::Image;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Reference daylight white point in kelvin.
pub const DAYLIGHT_KELVIN: f32 = 6500.0;

/// Lowest temperature the black-body fit is evaluated at.
pub const MIN_KELVIN: f32 = 1000.0;

/// Highest temperature the black-body fit is evaluated at.
pub const MAX_KELVIN: f32 = 40000.0;

/// Floor for white-point channels so very warm sources never divide by zero.
const MIN_WHITE: f32 = 0.05;

/// Green gain per unit of tint difference.
const TINT_SCALE: f32 = 0.002;

/// A neutral (white) point: color temperature plus green/magenta tint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neutral {
    /// Color temperature in kelvin.
    pub temperature: f32,
    /// Green (-) to magenta (+) tint.
    pub tint: f32,
}

impl Neutral {
    /// Creates a neutral without tint.
    pub const fn kelvin(temperature: f32) -> Self {
        Self {
            temperature,
            tint: 0.0,
        }
    }
}

impl Default for Neutral {
    fn default() -> Self {
        Self::kelvin(DAYLIGHT_KELVIN)
    }
}

/// Black-body RGB for a color temperature, normalized to `0..=1`.
pub fn kelvin_to_rgb(kelvin: f32) -> [f32; 3] {
    let t = kelvin.clamp(MIN_KELVIN, MAX_KELVIN) / 100.0;

    let r = if t <= 66.0 {
        255.0
    } else {
        329.698_73 * (t - 60.0).powf(-0.133_204_76)
    };
    let g = if t <= 66.0 {
        99.470_8 * t.ln() - 161.119_57
    } else {
        288.122_17 * (t - 60.0).powf(-0.075_514_85)
    };
    let b = if t >= 66.0 {
        255.0
    } else if t <= 19.0 {
        0.0
    } else {
        138.517_73 * (t - 10.0).ln() - 305.044_8
    };

    [r, g, b].map(|c| (c / 255.0).clamp(0.0, 1.0))
}

/// Temperature and tint correction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureAndTint {
    /// Neutral of the light the image was captured under.
    pub input_neutral: Neutral,
    /// Neutral the image is corrected towards.
    pub target_neutral: Neutral,
}

impl TemperatureAndTint {
    const NAME: &'static str = "TemperatureAndTint";

    /// Creates a correction between two untinted temperatures.
    pub fn new(input_kelvin: f32, target_kelvin: f32) -> Self {
        Self {
            input_neutral: Neutral::kelvin(input_kelvin),
            target_neutral: Neutral::kelvin(target_kelvin),
        }
    }

    /// Per-channel gains applied to RGB.
    pub fn gains(&self) -> [f32; 3] {
        let src = kelvin_to_rgb(self.input_neutral.temperature);
        let dst = kelvin_to_rgb(self.target_neutral.temperature);
        let mut gains = [0.0; 3];
        for i in 0..3 {
            gains[i] = dst[i].max(MIN_WHITE) / src[i].max(MIN_WHITE);
        }
        gains[1] *= 1.0 + (self.input_neutral.tint - self.target_neutral.tint) * TINT_SCALE;
        gains
    }
}

impl Filter for TemperatureAndTint {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, image: &Image) -> FilterResult<Image> {
        require_color(Self::NAME, image)?;
        require_finite(Self::NAME, "input temperature", self.input_neutral.temperature)?;
        require_finite(Self::NAME, "input tint", self.input_neutral.tint)?;
        require_finite(Self::NAME, "target temperature", self.target_neutral.temperature)?;
        require_finite(Self::NAME, "target tint", self.target_neutral.tint)?;

        let gains = self.gains();
        trace!(?gains, "TemperatureAndTint::apply");
        Ok(image.map_pixels(|px| {
            px[0] *= gains[0];
            px[1] *= gains[1];
            px[2] *= gains[2];
        }))
    }

    fn is_identity(&self) -> bool {
        self.input_neutral == self.target_neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilterError;
    use approx::assert_relative_eq;
    use looks_core::PixelLayout;

    #[test]
    fn test_daylight_is_near_white() {
        let rgb = kelvin_to_rgb(DAYLIGHT_KELVIN);
        for c in rgb {
            assert!(c > 0.95, "daylight channel {c} too dim");
        }
    }

    #[test]
    fn test_low_kelvin_is_warm() {
        let rgb = kelvin_to_rgb(3000.0);
        assert!(rgb[0] > rgb[1] && rgb[1] > rgb[2]);
    }

    #[test]
    fn test_equal_neutrals_identity() {
        let f = TemperatureAndTint::new(4500.0, 4500.0);
        assert!(f.is_identity());
        for g in f.gains() {
            assert_relative_eq!(g, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_warm_source_corrected_cooler() {
        let f = TemperatureAndTint::new(3000.0, DAYLIGHT_KELVIN);
        let g = f.gains();
        assert!(g[2] > g[0], "blue gain {} should exceed red gain {}", g[2], g[0]);
    }

    #[test]
    fn test_extreme_source_stays_finite() {
        let f = TemperatureAndTint::new(0.0, DAYLIGHT_KELVIN);
        assert!(f.gains().iter().all(|g| g.is_finite()));
    }

    #[test]
    fn test_tint_lifts_green() {
        let f = TemperatureAndTint {
            input_neutral: Neutral { temperature: DAYLIGHT_KELVIN, tint: 50.0 },
            target_neutral: Neutral::default(),
        };
        assert!(f.gains()[1] > 1.0);
    }

    #[test]
    fn test_gray_rejected() {
        let img = Image::new(2, 2, PixelLayout::Gray);
        let err = TemperatureAndTint::default().apply(&img).unwrap_err();
        assert!(matches!(err, FilterError::UnsupportedInput { .. }));
    }

    #[test]
    fn test_alpha_untouched() {
        let img = Image::filled(2, 2, PixelLayout::Rgba, &[0.5, 0.5, 0.5, 0.3]).unwrap();
        let out = TemperatureAndTint::new(3000.0, DAYLIGHT_KELVIN).apply(&img).unwrap();
        assert_eq!(out.pixel(0, 0)[3], 0.3);
    }
}
