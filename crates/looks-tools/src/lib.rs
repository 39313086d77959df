//! # looks-tools
//!
//! User-facing adjustment tools.
//!
//! A [`Tool`] owns one or more filters from `looks-ops` and exposes them
//! through [`Parameterized`]: a closed set of [`Parameter`]s, each edited on a
//! normalized slider scale and mapped onto the filter's native value by a
//! [`Curve`].
//!
//! ```text
//! slider value --clamp--> [min, max] --Curve::to_native--> filter field
//! filter field --Curve::to_normalized--> slider value
//! ```
//!
//! Curves and bounds live in a [`ParameterTable`]. A table can only be built
//! complete and valid, so a tool never meets a missing curve or a zero scale
//! while the user is dragging a slider.
//!
//! # Example
//!
//! ```rust
//! use looks_tools::{ColourCorrection, Parameter, Parameterized, Tool};
//!
//! let mut tool = ColourCorrection::new();
//! tool.set_value(50.0, Parameter::Brightness).unwrap();
//! assert!((tool.color_controls().brightness - 0.5).abs() < 1e-6);
//!
//! // Out-of-range input is clamped.
//! assert_eq!(tool.set_value(250.0, Parameter::Contrast).unwrap(), 100.0);
//! assert_eq!(tool.filter().len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod colour_correction;
pub mod curve;
pub mod parameter;
pub mod table;
pub mod tool;

pub use colour_correction::ColourCorrection;
pub use curve::Curve;
pub use error::{ToolError, ToolResult};
pub use parameter::Parameter;
pub use table::{ParameterSpec, ParameterTable};
pub use tool::{Icon, Parameterized, Tool};
