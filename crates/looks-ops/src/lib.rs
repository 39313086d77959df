//! # looks-ops
//!
//! Image filters for look previews and adjustment tools.
//!
//! Every operation implements [`Filter`]: a deterministic transform from one
//! [`Image`](looks_core::Image) to a new one. Filters chain into a
//! [`CompositeFilter`], which is itself a [`Filter`], so looks and tools can be
//! combined freely.
//!
//! # Modules
//!
//! - [`filter`] - The [`Filter`] trait and shared helpers
//! - [`composite`] - Ordered filter pipelines
//! - [`color_controls`] - Saturation, brightness and contrast
//! - [`temperature`] - White balance from a source to a target neutral
//! - [`matrix`] - 3x3 color matrix with offset
//! - [`effects`] - The fixed set of gallery looks
//!
//! # Example
//!
//! ```rust
//! use looks_core::{Image, PixelLayout};
//! use looks_ops::{ColorControls, CompositeFilter, Filter, PhotoEffect};
//!
//! let img = Image::filled(4, 4, PixelLayout::Rgb, &[0.4, 0.5, 0.6]).unwrap();
//!
//! let pipeline = PhotoEffect::Chrome.filter()
//!     + CompositeFilter::new("Adjust").then(ColorControls {
//!         brightness: 0.1,
//!         ..ColorControls::default()
//!     });
//!
//! let out = pipeline.apply(&img).unwrap();
//! assert_eq!(out.dimensions(), (4, 4));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod color_controls;
pub mod composite;
pub mod effects;
pub mod filter;
pub mod matrix;
pub mod temperature;

pub use color_controls::ColorControls;
pub use composite::CompositeFilter;
pub use effects::PhotoEffect;
pub use error::{FilterError, FilterResult};
pub use filter::{Filter, SharedFilter};
pub use matrix::ColorMatrix;
pub use temperature::{Neutral, TemperatureAndTint};
