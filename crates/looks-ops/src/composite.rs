//! Ordered filter pipelines.
//!
//! A [`CompositeFilter`] is a sequence of stages applied in order: the output
//! of stage *i* is the input of stage *i + 1*. Composites concatenate, so
//! `a + b` renders `b.apply(a.apply(image))`, and since nested composites are
//! flattened into one stage list, `(a + b) + c` and `a + (b + c)` hold the
//! same stages in the same order.
//!
//! # Example
//!
//! ```rust
//! use looks_ops::{ColorControls, CompositeFilter, Filter, TemperatureAndTint};
//!
//! let tool = CompositeFilter::new("Adjust")
//!     .then(TemperatureAndTint::default())
//!     .then(ColorControls::default());
//!
//! assert_eq!(tool.names(), vec!["TemperatureAndTint", "ColorControls"]);
//! assert!(CompositeFilter::identity().is_empty());
//! ```

use crate::{Filter, FilterResult, SharedFilter};
use looks_core::Image;
use std::fmt;
use std::ops::Add;
use std::sync::Arc;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// An ordered pipeline of filters.
///
/// The empty composite is the identity transform.
#[derive(Clone, Default)]
pub struct CompositeFilter {
    name: String,
    stages: Vec<SharedFilter>,
}

impl CompositeFilter {
    /// Creates an empty, named pipeline.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
        }
    }

    /// Creates an unnamed identity pipeline.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Appends a filter as a single stage.
    ///
    /// Use [`extend`](Self::extend) or `+` to splice in another composite's
    /// stages instead.
    pub fn then(self, filter: impl Filter + 'static) -> Self {
        self.then_shared(Arc::new(filter))
    }

    /// Appends an already shared filter.
    pub fn then_shared(mut self, filter: SharedFilter) -> Self {
        self.stages.push(filter);
        self
    }

    /// Appends every stage of `other`, keeping this pipeline's name.
    pub fn extend(mut self, other: &CompositeFilter) -> Self {
        self.stages.extend(other.stages.iter().cloned());
        self
    }

    /// Renames the pipeline.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Concatenates two pipelines: `a` runs first, then `b`.
    ///
    /// The result is named after whichever side has a name; when both do the
    /// names are joined with `" + "`.
    pub fn combine(a: &CompositeFilter, b: &CompositeFilter) -> Self {
        let name = match (a.name.is_empty(), b.name.is_empty()) {
            (true, _) => b.name.clone(),
            (false, true) => a.name.clone(),
            (false, false) => format!("{} + {}", a.name, b.name),
        };
        let mut stages = Vec::with_capacity(a.stages.len() + b.stages.len());
        stages.extend(a.stages.iter().cloned());
        stages.extend(b.stages.iter().cloned());
        Self { name, stages }
    }

    /// Returns the number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Returns the stages in application order.
    pub fn stages(&self) -> &[SharedFilter] {
        &self.stages
    }

    /// Returns the stage names in application order.
    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Filter for CompositeFilter {
    fn name(&self) -> &str {
        &self.name
    }

    /// Runs every stage in order.
    ///
    /// Stops at the first failing stage and returns its error; intermediate
    /// images are dropped, so a failure never yields partial output.
    fn apply(&self, image: &Image) -> FilterResult<Image> {
        trace!(pipeline = %self.name, stages = self.stages.len(), "apply");
        let mut current = image.clone();
        for stage in &self.stages {
            current = stage.apply(&current).inspect_err(|e| {
                debug!(pipeline = %self.name, stage = stage.name(), error = %e, "stage failed");
            })?;
        }
        Ok(current)
    }

    fn is_identity(&self) -> bool {
        self.stages.iter().all(|s| s.is_identity())
    }
}

impl Add for CompositeFilter {
    type Output = CompositeFilter;

    fn add(self, rhs: CompositeFilter) -> CompositeFilter {
        CompositeFilter::combine(&self, &rhs)
    }
}

impl Add for &CompositeFilter {
    type Output = CompositeFilter;

    fn add(self, rhs: &CompositeFilter) -> CompositeFilter {
        CompositeFilter::combine(self, rhs)
    }
}

impl fmt::Debug for CompositeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeFilter")
            .field("name", &self.name)
            .field("stages", &self.names())
            .finish()
    }
}
