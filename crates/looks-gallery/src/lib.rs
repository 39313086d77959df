//! # looks-gallery
//!
//! Everything between a set of looks and the screen:
//!
//! - [`Gallery`] - the ordered looks, unique by name
//! - [`PreviewCache`] - one preview per look for the current photo
//! - [`SelectionController`] - which look is applied, picked or highlighted
//! - [`EditSession`] - a photo, its gallery and the colour-correction tool
//! - [`SessionConfig`] - YAML configuration for all of the above
//!
//! # Example
//!
//! ```rust
//! use looks_core::{Image, PixelLayout};
//! use looks_gallery::SessionConfig;
//! use looks_tools::Parameter;
//!
//! let config = SessionConfig::from_yaml_str("gallery: { looks: [Original, Mono, Chrome] }").unwrap();
//! let mut session = config.build().unwrap();
//! session.attach(|index: usize, previous: usize| println!("selected {index} (was {previous})"));
//!
//! let photo = Image::filled(64, 48, PixelLayout::Rgba, &[0.6, 0.4, 0.3, 1.0]).unwrap();
//! session.set_base_image(photo);
//!
//! let chrome = session.preview(2).unwrap();
//! session.pick(2).unwrap();
//! session.set_value(25.0, Parameter::Brightness).unwrap();
//! let edited = session.render().unwrap();
//! assert_eq!(edited.dimensions(), chrome.dimensions());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod cache;
pub mod config;
pub mod gallery;
pub mod selection;
pub mod session;

pub use cache::{CacheStats, PreviewCache};
pub use config::{GallerySection, PreviewSection, SessionConfig};
pub use error::{GalleryError, GalleryResult};
pub use gallery::Gallery;
pub use selection::{SelectionController, SelectionObserver, SelectionState};
pub use session::{EditSession, RenderSurface};
