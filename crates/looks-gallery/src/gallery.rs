//! Ordered, session-immutable list of looks.

use crate::{GalleryError, GalleryResult};
use looks_ops::{Filter, PhotoEffect, SharedFilter};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// The looks offered to the user, in display order.
///
/// Names are unique: they key the preview cache.
#[derive(Clone)]
pub struct Gallery {
    looks: Vec<SharedFilter>,
}

impl Gallery {
    /// Builds a gallery, rejecting empty lists and repeated names.
    pub fn new(looks: Vec<SharedFilter>) -> GalleryResult<Self> {
        if looks.is_empty() {
            return Err(GalleryError::Empty);
        }
        let mut seen = HashSet::new();
        for look in &looks {
            if !seen.insert(look.name()) {
                return Err(GalleryError::DuplicateName {
                    name: look.name().to_string(),
                });
            }
        }
        Ok(Self { looks })
    }

    /// Every built-in photo effect, `Original` first.
    pub fn builtin() -> Self {
        Self {
            looks: PhotoEffect::ALL
                .into_iter()
                .map(|e| Arc::new(e.filter()) as SharedFilter)
                .collect(),
        }
    }

    /// Gallery from a list of presets.
    pub fn from_effects(effects: &[PhotoEffect]) -> GalleryResult<Self> {
        Self::new(
            effects
                .iter()
                .map(|e| Arc::new(e.filter()) as SharedFilter)
                .collect(),
        )
    }

    /// Gallery from preset names, ignoring case.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> GalleryResult<Self> {
        let effects = names
            .iter()
            .map(|n| {
                n.as_ref().parse::<PhotoEffect>().map_err(|_| GalleryError::UnknownLook {
                    name: n.as_ref().to_string(),
                })
            })
            .collect::<GalleryResult<Vec<_>>>()?;
        Self::from_effects(&effects)
    }

    /// Look at `index`.
    pub fn get(&self, index: usize) -> Option<&SharedFilter> {
        self.looks.get(index)
    }

    /// Look at `index`, or [`GalleryError::IndexOutOfRange`].
    pub fn look(&self, index: usize) -> GalleryResult<&SharedFilter> {
        self.looks.get(index).ok_or(GalleryError::IndexOutOfRange {
            index,
            len: self.looks.len(),
        })
    }

    /// Position of the look named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.looks.iter().position(|l| l.name() == name)
    }

    /// Look names in order.
    pub fn names(&self) -> Vec<&str> {
        self.looks.iter().map(|l| l.name()).collect()
    }

    /// Number of looks. Never zero.
    pub fn len(&self) -> usize {
        self.looks.len()
    }

    /// Returns `false` for every constructed gallery.
    pub fn is_empty(&self) -> bool {
        self.looks.is_empty()
    }

    /// Iterates the looks in order.
    pub fn iter(&self) -> impl Iterator<Item = &SharedFilter> {
        self.looks.iter()
    }
}

impl fmt::Debug for Gallery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gallery").field("looks", &self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use looks_ops::{ColorMatrix, CompositeFilter};

    #[test]
    fn test_builtin() {
        let g = Gallery::builtin();
        assert_eq!(g.len(), PhotoEffect::ALL.len());
        assert_eq!(g.names()[0], "Original");
        assert_eq!(g.position("Sepia"), Some(9));
        assert!(g.get(10).is_none());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(Gallery::new(Vec::new()), Err(GalleryError::Empty)));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let a: SharedFilter = Arc::new(CompositeFilter::new("Warm").then(ColorMatrix::sepia()));
        let b: SharedFilter = Arc::new(CompositeFilter::new("Warm"));
        let err = Gallery::new(vec![a, b]).unwrap_err();
        assert!(matches!(err, GalleryError::DuplicateName { ref name } if name == "Warm"));

        let err = Gallery::from_effects(&[PhotoEffect::Mono, PhotoEffect::Mono]).unwrap_err();
        assert!(matches!(err, GalleryError::DuplicateName { .. }));
    }

    #[test]
    fn test_from_names() {
        let g = Gallery::from_names(&["original", "MONO", "Chrome"]).unwrap();
        assert_eq!(g.names(), vec!["Original", "Mono", "Chrome"]);

        let err = Gallery::from_names(&["Original", "Vivid"]).unwrap_err();
        assert!(matches!(err, GalleryError::UnknownLook { ref name } if name == "Vivid"));
    }

    #[test]
    fn test_look_out_of_range() {
        let g = Gallery::from_effects(&[PhotoEffect::Original]).unwrap();
        assert!(matches!(g.look(3), Err(GalleryError::IndexOutOfRange { index: 3, len: 1 })));
    }
}
