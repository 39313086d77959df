//! Image buffer shared between filters, tools and the preview cache.
//!
//! # Memory Layout
//!
//! Images store `f32` samples in **row-major** order, top-to-bottom, with
//! channels interleaved according to the [`PixelLayout`]:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! Samples are display-referred and normalized: `0.0` is black and `1.0` is
//! full intensity. Filters may push values outside that range; clamping is
//! left to whoever presents the result.
//!
//! # Sharing
//!
//! The sample buffer lives behind an [`Arc`], so cloning an image is cheap and
//! the preview cache can hand the same render to several readers. Every
//! transform in looks-rs produces a new buffer; an image handed to a filter is
//! never written to.
//!
//! # Usage
//!
//! ```rust
//! use looks_core::{Image, PixelLayout};
//!
//! let img = Image::filled(8, 8, PixelLayout::Rgb, &[0.25, 0.5, 1.0]).unwrap();
//! let brighter = img.map_pixels(|px| {
//!     for c in px.iter_mut() {
//!         *c += 0.1;
//!     }
//! });
//!
//! assert_eq!(img.pixel(0, 0), &[0.25, 0.5, 1.0]);
//! assert!((brighter.pixel(0, 0)[0] - 0.35).abs() < 1e-6);
//! ```

use crate::{Error, PixelLayout, Result};
use rayon::prelude::*;
use std::sync::Arc;

/// Owned, reference-counted image buffer.
///
/// Equality is bitwise: two images are equal when they share layout and
/// dimensions and every sample has the same bit pattern. This is the
/// comparison the preview cache guarantees for a hit.
#[derive(Clone)]
pub struct Image {
    /// Interleaved samples (Arc for cheap cloning)
    data: Arc<Vec<f32>>,
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
    /// Channel layout
    layout: PixelLayout,
}

impl Image {
    /// Creates a new image filled with zeros.
    ///
    /// # Example
    ///
    /// ```rust
    /// use looks_core::{Image, PixelLayout};
    ///
    /// let img = Image::new(1920, 1080, PixelLayout::Rgba);
    /// assert_eq!(img.data().len(), 1920 * 1080 * 4);
    /// ```
    pub fn new(width: u32, height: u32, layout: PixelLayout) -> Self {
        let len = width as usize * height as usize * layout.channels();
        Self {
            data: Arc::new(vec![0.0; len]),
            width,
            height,
            layout,
        }
    }

    /// Creates an image from existing interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero or
    /// `data` does not hold exactly `width * height * layout.channels()`
    /// samples.
    ///
    /// # Example
    ///
    /// ```rust
    /// use looks_core::{Image, PixelLayout};
    ///
    /// let samples = vec![0.0f32; 10 * 10];
    /// let img = Image::from_data(10, 10, PixelLayout::Gray, samples).unwrap();
    /// assert_eq!(img.channels(), 1);
    /// ```
    pub fn from_data(width: u32, height: u32, layout: PixelLayout, data: Vec<f32>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(layout.channels()))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "sample count overflows"))?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
            layout,
        })
    }

    /// Creates an image where every pixel equals `pixel`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] if `pixel` does not have one value
    /// per channel of `layout`, and [`Error::InvalidDimensions`] for a zero
    /// dimension.
    pub fn filled(width: u32, height: u32, layout: PixelLayout, pixel: &[f32]) -> Result<Self> {
        check_dimensions(width, height)?;
        if pixel.len() != layout.channels() {
            return Err(Error::channel_mismatch(layout.channels(), pixel.len()));
        }
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * pixel.len());
        for _ in 0..pixel_count {
            data.extend_from_slice(pixel);
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
            layout,
        })
    }

    /// Creates an image by evaluating `f(x, y)` for every pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] if `f` returns a pixel whose length
    /// differs from the layout's channel count.
    pub fn from_fn<F>(width: u32, height: u32, layout: PixelLayout, f: F) -> Result<Self>
    where
        F: Fn(u32, u32) -> Vec<f32>,
    {
        check_dimensions(width, height)?;
        let channels = layout.channels();
        let mut data = Vec::with_capacity(width as usize * height as usize * channels);
        for y in 0..height {
            for x in 0..width {
                let px = f(x, y);
                if px.len() != channels {
                    return Err(Error::channel_mismatch(channels, px.len()));
                }
                data.extend_from_slice(&px);
            }
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
            layout,
        })
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the channel layout.
    #[inline]
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Returns the number of channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns `true` if both images share the same sample buffer.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Returns the samples of the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[f32] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let channels = self.channels();
        let offset = (y as usize * self.width as usize + x as usize) * channels;
        &self.data[offset..offset + channels]
    }

    /// Returns a new image with `f` applied to a copy of every pixel.
    ///
    /// Rows are processed in parallel with rayon. `f` receives the samples of
    /// one pixel (`channels()` long) and edits them in place; the source
    /// image is left untouched.
    pub fn map_pixels<F>(&self, f: F) -> Self
    where
        F: Fn(&mut [f32]) + Sync,
    {
        let channels = self.channels();
        let row_len = self.width as usize * channels;
        let mut data = self.data.as_ref().clone();
        if row_len > 0 {
            data.par_chunks_mut(row_len).for_each(|row| {
                for px in row.chunks_exact_mut(channels) {
                    f(px);
                }
            });
        }
        Self {
            data: Arc::new(data),
            width: self.width,
            height: self.height,
            layout: self.layout,
        }
    }

    /// Per-channel mean over all pixels.
    ///
    /// Returns zeros for an empty image.
    pub fn mean(&self) -> Vec<f64> {
        let channels = self.channels();
        let mut sums = vec![0.0f64; channels];
        for px in self.data.chunks_exact(channels) {
            for (sum, &v) in sums.iter_mut().zip(px) {
                *sum += f64::from(v);
            }
        }
        let count = self.pixel_count();
        if count > 0 {
            for sum in &mut sums {
                *sum /= count as f64;
            }
        }
        sums
    }

    /// Box-filters the image so its longest side is at most `max_dim`.
    ///
    /// The reduction factor is an integer, so the result may be smaller than
    /// `max_dim`. Returns a cheap clone when the image already fits or when
    /// `max_dim` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use looks_core::{Image, PixelLayout};
    ///
    /// let img = Image::new(400, 300, PixelLayout::Rgb);
    /// let thumb = img.downsample(100);
    /// assert_eq!(thumb.dimensions(), (100, 75));
    /// ```
    pub fn downsample(&self, max_dim: u32) -> Self {
        let longest = self.width.max(self.height);
        if max_dim == 0 || longest <= max_dim || self.is_empty() {
            return self.clone();
        }

        let factor = longest.div_ceil(max_dim);
        let out_w = self.width.div_ceil(factor);
        let out_h = self.height.div_ceil(factor);
        let channels = self.channels();
        let src_w = self.width as usize;
        let src = self.data.as_slice();

        let mut out = vec![0.0f32; out_w as usize * out_h as usize * channels];
        out.par_chunks_mut(out_w as usize * channels)
            .enumerate()
            .for_each(|(oy, row)| {
                let y0 = oy * factor as usize;
                let y1 = (y0 + factor as usize).min(self.height as usize);
                for (ox, dst) in row.chunks_exact_mut(channels).enumerate() {
                    let x0 = ox * factor as usize;
                    let x1 = (x0 + factor as usize).min(src_w);
                    let count = ((y1 - y0) * (x1 - x0)) as f32;
                    for y in y0..y1 {
                        for x in x0..x1 {
                            let offset = (y * src_w + x) * channels;
                            for (d, s) in dst.iter_mut().zip(&src[offset..offset + channels]) {
                                *d += s;
                            }
                        }
                    }
                    for d in dst.iter_mut() {
                        *d /= count;
                    }
                }
            });

        Self {
            data: Arc::new(out),
            width: out_w,
            height: out_h,
            layout: self.layout,
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "image has zero area"));
    }
    Ok(())
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.layout == other.layout
            && self.width == other.width
            && self.height == other.height
            && (self.ptr_eq(other)
                || self
                    .data
                    .iter()
                    .zip(other.data.iter())
                    .all(|(a, b)| a.to_bits() == b.to_bits()))
    }
}

impl Eq for Image {}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("layout", &self.layout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_is_zeroed() {
        let img = Image::new(4, 3, PixelLayout::Rgba);
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.pixel_count(), 12);
        assert!(img.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_from_data_length_checked() {
        let err = Image::from_data(2, 2, PixelLayout::Rgb, vec![0.0; 11]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));
        assert!(Image::from_data(2, 2, PixelLayout::Rgb, vec![0.0; 12]).is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = Image::from_data(0, 10, PixelLayout::Rgb, vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { width: 0, height: 10, .. }));
        assert!(Image::filled(4, 0, PixelLayout::Gray, &[0.5]).is_err());
        assert!(Image::from_fn(0, 0, PixelLayout::Gray, |_, _| vec![0.0]).is_err());
    }

    #[test]
    fn test_downsample_empty_is_clone() {
        let img = Image::new(0, 10, PixelLayout::Rgb);
        let thumb = img.downsample(4);
        assert_eq!(thumb.dimensions(), (0, 10));
        assert!(thumb.ptr_eq(&img));
    }

    #[test]
    fn test_filled_channel_mismatch() {
        let err = Image::filled(2, 2, PixelLayout::Rgba, &[1.0, 1.0, 1.0]).unwrap_err();
        assert_eq!(err, Error::channel_mismatch(4, 3));
    }

    #[test]
    fn test_from_fn() {
        let img = Image::from_fn(3, 2, PixelLayout::Gray, |x, y| vec![(x + y * 3) as f32]).unwrap();
        assert_eq!(img.pixel(2, 1), &[5.0]);
    }

    #[test]
    fn test_map_pixels_leaves_source() {
        let img = Image::filled(16, 16, PixelLayout::Rgba, &[0.5, 0.5, 0.5, 1.0]).unwrap();
        let out = img.map_pixels(|px| px[0] = 1.0);
        assert_eq!(img.pixel(3, 3), &[0.5, 0.5, 0.5, 1.0]);
        assert_eq!(out.pixel(3, 3), &[1.0, 0.5, 0.5, 1.0]);
        assert!(!img.ptr_eq(&out));
    }

    #[test]
    fn test_clone_shares_buffer() {
        let img = Image::new(8, 8, PixelLayout::Rgb);
        let copy = img.clone();
        assert!(img.ptr_eq(&copy));
        assert_eq!(img, copy);
    }

    #[test]
    fn test_equality_is_bitwise() {
        let a = Image::filled(2, 2, PixelLayout::Gray, &[0.0]).unwrap();
        let b = Image::filled(2, 2, PixelLayout::Gray, &[-0.0]).unwrap();
        assert_ne!(a, b);
        let c = Image::filled(2, 2, PixelLayout::Gray, &[0.0]).unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn test_mean() {
        let img = Image::from_fn(2, 1, PixelLayout::Rgb, |x, _| vec![x as f32, 1.0, 0.0]).unwrap();
        let mean = img.mean();
        assert_relative_eq!(mean[0], 0.5);
        assert_relative_eq!(mean[1], 1.0);
        assert_relative_eq!(mean[2], 0.0);
    }

    #[test]
    fn test_downsample_averages_blocks() {
        let img = Image::from_fn(4, 2, PixelLayout::Gray, |x, _| vec![if x < 2 { 0.0 } else { 1.0 }]).unwrap();
        let thumb = img.downsample(2);
        assert_eq!(thumb.dimensions(), (2, 1));
        assert_relative_eq!(thumb.pixel(0, 0)[0], 0.0);
        assert_relative_eq!(thumb.pixel(1, 0)[0], 1.0);
    }

    #[test]
    fn test_downsample_partial_blocks() {
        let img = Image::filled(5, 3, PixelLayout::Rgba, &[0.2, 0.4, 0.6, 1.0]).unwrap();
        let thumb = img.downsample(2);
        assert_eq!(thumb.dimensions(), (2, 1));
        for x in 0..2 {
            let px = thumb.pixel(x, 0);
            assert_relative_eq!(px[0], 0.2, epsilon = 1e-6);
            assert_relative_eq!(px[3], 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_downsample_small_image_is_shared() {
        let img = Image::new(10, 10, PixelLayout::Rgb);
        assert!(img.downsample(64).ptr_eq(&img));
        assert!(img.downsample(0).ptr_eq(&img));
    }
}
