//! Pixel helpers.

/// Rec.709 luminance coefficient for red channel.
pub const REC709_LUMA_R: f32 = 0.2126;

/// Rec.709 luminance coefficient for green channel.
pub const REC709_LUMA_G: f32 = 0.7152;

/// Rec.709 luminance coefficient for blue channel.
pub const REC709_LUMA_B: f32 = 0.0722;

/// Rec.709 luminance coefficients as an array [R, G, B].
pub const REC709_LUMA: [f32; 3] = [REC709_LUMA_R, REC709_LUMA_G, REC709_LUMA_B];

/// Calculate Rec.709 luminance from RGB values.
///
/// # Example
///
/// ```rust
/// use looks_core::luminance_rec709;
///
/// let white = luminance_rec709([1.0, 1.0, 1.0]);
/// assert!((white - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn luminance_rec709(rgb: [f32; 3]) -> f32 {
    rgb[0] * REC709_LUMA_R + rgb[1] * REC709_LUMA_G + rgb[2] * REC709_LUMA_B
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_coefficients_sum_to_one() {
        assert_relative_eq!(REC709_LUMA.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_green_dominates() {
        let g = luminance_rec709([0.0, 1.0, 0.0]);
        let r = luminance_rec709([1.0, 0.0, 0.0]);
        let b = luminance_rec709([0.0, 0.0, 1.0]);
        assert!(g > r && r > b);
    }
}
