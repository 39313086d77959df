//! The [`Filter`] trait.
//!
//! A filter is a named, deterministic image transform. It may hold numeric
//! state (a brightness offset, a white point) that its owner changes between
//! calls, but [`Filter::apply`] itself takes `&self`: applying never mutates
//! the filter or the input image.
//!
//! # Example
//!
//! ```rust
//! use looks_core::{Image, PixelLayout};
//! use looks_ops::{Filter, FilterResult};
//!
//! #[derive(Debug)]
//! struct Invert;
//!
//! impl Filter for Invert {
//!     fn name(&self) -> &str {
//!         "Invert"
//!     }
//!
//!     fn apply(&self, image: &Image) -> FilterResult<Image> {
//!         Ok(image.map_pixels(|px| {
//!             for c in px.iter_mut() {
//!                 *c = 1.0 - *c;
//!             }
//!         }))
//!     }
//! }
//!
//! let img = Image::filled(2, 2, PixelLayout::Gray, &[0.25]).unwrap();
//! assert_eq!(Invert.apply(&img).unwrap().pixel(0, 0), &[0.75]);
//! ```

use crate::{FilterError, FilterResult};
use looks_core::Image;
use std::fmt;
use std::sync::Arc;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// A deterministic image-to-image transform.
pub trait Filter: Send + Sync + fmt::Debug {
    /// Display name; unique within a gallery and used as the preview cache key.
    fn name(&self) -> &str;

    /// Renders `image` through this filter into a new image.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnsupportedInput`] when the image layout cannot
    /// be processed and [`FilterError::InvalidParameter`] when the filter's
    /// state is unusable.
    fn apply(&self, image: &Image) -> FilterResult<Image>;

    /// Returns `true` if applying the filter leaves every pixel unchanged.
    fn is_identity(&self) -> bool {
        false
    }
}

/// Shared, type-erased filter handle.
pub type SharedFilter = Arc<dyn Filter>;

impl<F: Filter + ?Sized> Filter for Arc<F> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn apply(&self, image: &Image) -> FilterResult<Image> {
        (**self).apply(image)
    }

    fn is_identity(&self) -> bool {
        (**self).is_identity()
    }
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn apply(&self, image: &Image) -> FilterResult<Image> {
        (**self).apply(image)
    }

    fn is_identity(&self) -> bool {
        (**self).is_identity()
    }
}

/// Rejects images without separate red, green and blue channels.
pub fn require_color(filter: &str, image: &Image) -> FilterResult<()> {
    if image.layout().has_color() {
        Ok(())
    } else {
        debug!(filter, layout = %image.layout(), "rejecting input without color channels");
        Err(FilterError::unsupported_input(filter, image.layout()))
    }
}

/// Rejects non-finite filter parameters.
pub fn require_finite(filter: &str, what: &str, value: f32) -> FilterResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FilterError::invalid_parameter(
            filter,
            format!("{} is not finite ({})", what, value),
        ))
    }
}
