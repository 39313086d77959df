//! # looks-core
//!
//! Core types shared by every looks-rs crate.
//!
//! - [`Image`] - Reference-counted float image buffer handed between filters
//! - [`PixelLayout`] - Channel layout of an [`Image`] (gray, RGB, with or without alpha)
//! - [`luminance_rec709`] - Rec.709 luma used by saturation and monochrome looks
//! - [`Error`] - Buffer construction errors
//!
//! ## Crate Structure
//!
//! ```text
//! looks-core (this crate)
//!    ^
//!    |
//!    +-- looks-ops (Filter, CompositeFilter, photo effects)
//!    +-- looks-tools (parameters, curves, adjustment tools)
//!    +-- looks-gallery (gallery, preview cache, selection, session)
//! ```
//!
//! Decoding and encoding are not part of this crate: callers hand in decoded
//! pixel data as normalized `f32` samples and receive the same back.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod layout;
pub mod pixel;

pub use error::{Error, Result};
pub use image::Image;
pub use layout::PixelLayout;
pub use pixel::{luminance_rec709, REC709_LUMA, REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R};

/// Prelude module for convenient imports.
///
/// ```
/// use looks_core::prelude::*;
///
/// let img = Image::filled(4, 4, PixelLayout::Rgb, &[0.5, 0.5, 0.5]).unwrap();
/// assert_eq!(img.layout(), PixelLayout::Rgb);
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
    pub use crate::layout::PixelLayout;
    pub use crate::pixel::luminance_rec709;
}
