//! 3x3 color matrix with offset.
//!
//! Applied as `[R', G', B'] = M * [R, G, B] + offset`. Alpha passes through.

use crate::filter::require_color;
use crate::{Filter, FilterResult};
use looks_core::{Image, REC709_LUMA};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Identity matrix.
pub const IDENTITY: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// A 3x3 color matrix plus offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    /// Row-major matrix; row *i* produces output channel *i*.
    pub matrix: [[f32; 3]; 3],
    /// Added after the matrix.
    pub offset: [f32; 3],
    /// Clamp results to `[0, 1]`.
    pub clamp: bool,
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self {
            matrix: IDENTITY,
            offset: [0.0; 3],
            clamp: false,
        }
    }
}

impl ColorMatrix {
    const NAME: &'static str = "ColorMatrix";

    /// Creates a matrix without offset.
    pub const fn new(matrix: [[f32; 3]; 3]) -> Self {
        Self {
            matrix,
            offset: [0.0; 3],
            clamp: false,
        }
    }

    /// Per-channel scale.
    pub const fn scale(s: [f32; 3]) -> Self {
        Self::new([[s[0], 0.0, 0.0], [0.0, s[1], 0.0], [0.0, 0.0, s[2]]])
    }

    /// Sets the offset.
    pub const fn with_offset(mut self, offset: [f32; 3]) -> Self {
        self.offset = offset;
        self
    }

    /// Clamps output channels to `[0, 1]`.
    pub const fn with_clamp(mut self) -> Self {
        self.clamp = true;
        self
    }

    /// Replaces every channel with Rec.709 luma.
    pub const fn monochrome() -> Self {
        Self::new([REC709_LUMA, REC709_LUMA, REC709_LUMA])
    }

    /// Classic sepia toning.
    pub const fn sepia() -> Self {
        Self::new([
            [0.393, 0.769, 0.189],
            [0.349, 0.686, 0.168],
            [0.272, 0.534, 0.131],
        ])
    }

    /// Apply to an RGB triple.
    #[inline]
    pub fn apply_rgb(&self, rgb: [f32; 3]) -> [f32; 3] {
        let m = &self.matrix;
        let out = [
            m[0][0] * rgb[0] + m[0][1] * rgb[1] + m[0][2] * rgb[2] + self.offset[0],
            m[1][0] * rgb[0] + m[1][1] * rgb[1] + m[1][2] * rgb[2] + self.offset[1],
            m[2][0] * rgb[0] + m[2][1] * rgb[1] + m[2][2] * rgb[2] + self.offset[2],
        ];
        if self.clamp { out.map(|c| c.clamp(0.0, 1.0)) } else { out }
    }
}

impl Filter for ColorMatrix {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, image: &Image) -> FilterResult<Image> {
        require_color(Self::NAME, image)?;
        trace!(matrix = ?self.matrix, offset = ?self.offset, clamp = self.clamp, "ColorMatrix::apply");
        Ok(image.map_pixels(|px| {
            let out = self.apply_rgb([px[0], px[1], px[2]]);
            px[..3].copy_from_slice(&out);
        }))
    }

    fn is_identity(&self) -> bool {
        self.matrix == IDENTITY && self.offset == [0.0; 3] && !self.clamp
    }
}
