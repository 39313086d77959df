//! Thread-safe preview cache.
//!
//! Stores one rendered preview per look name for the current base image.
//!
//! ```ignore
//! use looks_gallery::PreviewCache;
//!
//! let cache = PreviewCache::with_thumbnail(256);
//! cache.set_base_image(&photo);
//!
//! // First call renders, later calls return the stored preview.
//! let sepia = cache.get_or_render(look.as_ref())?;
//! ```
//!
//! # Coherency
//!
//! Every base-image change bumps a generation counter under the cache lock
//! and empties the map in the same critical section. A render records the
//! generation it started under and is only stored if that generation is
//! still current, so a preview computed from an old image is never visible
//! after the switch.
//!
//! Concurrent misses for the same name share one render: the first caller
//! renders outside the lock, later callers block on its in-flight cell and
//! receive a clone of the same result. Failures are shared the same way and
//! are never stored. If the render panics, waiters get
//! [`GalleryError::Abandoned`] and the next request renders again.
//!
//! Previews rendered outside the cache are stored with [`PreviewCache::set`]
//! together with the generation read before rendering; writes for a replaced
//! base image are dropped.

use crate::{GalleryError, GalleryResult};
use looks_core::Image;
use looks_ops::{Filter, FilterResult};
use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
#[allow(unused_imports)]
use tracing::{debug, trace, warn};

/// Cache statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the map.
    pub hits: u64,
    /// Lookups that found nothing stored.
    pub misses: u64,
    /// Renders performed by this cache.
    pub renders: u64,
    /// Renders dropped because the base image changed meanwhile.
    pub discarded: u64,
    /// Calls to `invalidate_all` and base-image changes.
    pub invalidations: u64,
}

impl CacheStats {
    /// Hit rate as percentage.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// How an in-flight render ended.
#[derive(Debug)]
enum Outcome {
    Rendered(FilterResult<Image>),
    /// The leader unwound before producing a result.
    Abandoned,
}

/// A render in progress, shared by every caller waiting for it.
#[derive(Debug)]
struct InFlight {
    generation: u64,
    outcome: Mutex<Option<Outcome>>,
    done: Condvar,
}

impl InFlight {
    fn new(generation: u64) -> Self {
        Self {
            generation,
            outcome: Mutex::new(None),
            done: Condvar::new(),
        }
    }

    fn complete(&self, outcome: Outcome) {
        let mut slot = self.outcome.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(outcome);
        self.done.notify_all();
    }

    /// Blocks until the leader finishes; `None` if it abandoned the render.
    fn wait(&self) -> Option<FilterResult<Image>> {
        let mut slot = self.outcome.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            match slot.as_ref() {
                Some(Outcome::Rendered(result)) => return Some(result.clone()),
                Some(Outcome::Abandoned) => return None,
                None => slot = self.done.wait(slot).unwrap_or_else(PoisonError::into_inner),
            }
        }
    }
}

/// Held by the caller running a render. Finishing records the result; being
/// dropped unfinished (the filter panicked) clears the in-flight entry and
/// wakes waiters with [`Outcome::Abandoned`].
struct Leader<'a> {
    cache: &'a PreviewCache,
    name: &'a str,
    cell: Arc<InFlight>,
    finished: bool,
}

impl Leader<'_> {
    fn release(&self, inner: &mut Inner) {
        if inner
            .in_flight
            .get(self.name)
            .is_some_and(|c| Arc::ptr_eq(c, &self.cell))
        {
            inner.in_flight.remove(self.name);
        }
    }

    fn finish(mut self, result: &FilterResult<Image>) {
        self.finished = true;
        let name = self.name;
        {
            let mut inner = self.cache.lock();
            self.release(&mut inner);
            inner.stats.renders += 1;
            if inner.generation != self.cell.generation {
                inner.stats.discarded += 1;
                warn!(name, "base image changed during render, preview discarded");
            } else if let Ok(image) = result {
                inner.entries.insert(name.to_string(), image.clone());
            }
        }
        if let Err(e) = result {
            debug!(name, error = %e, "preview render failed");
        }
        self.cell.complete(Outcome::Rendered(result.clone()));
    }
}

impl Drop for Leader<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        {
            let mut inner = self.cache.lock();
            self.release(&mut inner);
        }
        warn!(name = self.name, "preview render panicked, waiters released");
        self.cell.complete(Outcome::Abandoned);
    }
}

#[derive(Debug, Default)]
struct Inner {
    generation: u64,
    base: Option<Image>,
    entries: HashMap<String, Image>,
    in_flight: HashMap<String, Arc<InFlight>>,
    stats: CacheStats,
}

impl Inner {
    fn invalidate(&mut self) {
        self.generation += 1;
        self.entries.clear();
        self.in_flight.clear();
        self.stats.invalidations += 1;
    }
}

/// Preview memoization keyed by look name.
#[derive(Debug, Default)]
pub struct PreviewCache {
    inner: Mutex<Inner>,
    thumbnail: Option<u32>,
}

impl PreviewCache {
    /// Cache rendering at the base image's full size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache rendering from a copy of the base image downsampled so its
    /// longest side is at most `max_dim`.
    pub fn with_thumbnail(max_dim: u32) -> Self {
        Self {
            inner: Mutex::default(),
            thumbnail: Some(max_dim),
        }
    }

    /// Thumbnail limit, if any.
    pub fn thumbnail(&self) -> Option<u32> {
        self.thumbnail
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the base image and drops every stored preview.
    ///
    /// Renders still running against the old image finish for their own
    /// callers but are not stored.
    pub fn set_base_image(&self, image: &Image) {
        let base = match self.thumbnail {
            Some(max_dim) => image.downsample(max_dim),
            None => image.clone(),
        };
        let mut inner = self.lock();
        inner.invalidate();
        debug!(
            generation = inner.generation,
            width = base.width(),
            height = base.height(),
            "preview base image replaced"
        );
        inner.base = Some(base);
    }

    /// Image previews are rendered from, after downsampling.
    pub fn base_image(&self) -> Option<Image> {
        self.lock().base.clone()
    }

    /// Drops every stored preview, keeping the base image.
    pub fn invalidate_all(&self) {
        let mut inner = self.lock();
        let dropped = inner.entries.len();
        inner.invalidate();
        debug!(generation = inner.generation, dropped, "preview cache invalidated");
    }

    /// Stored preview for `name`.
    pub fn get(&self, name: &str) -> Option<Image> {
        let mut inner = self.lock();
        match inner.entries.get(name).cloned() {
            Some(image) => {
                inner.stats.hits += 1;
                trace!(name, "preview hit");
                Some(image)
            }
            None => {
                inner.stats.misses += 1;
                None
            }
        }
    }

    /// Current base-image generation. Capture it before rendering a preview
    /// outside the cache and hand it back to [`set`](Self::set).
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Stores a preview rendered elsewhere against base-image `generation`.
    ///
    /// Returns `false` and drops the preview when the base image was replaced
    /// or the cache invalidated since `generation` was read.
    pub fn set(&self, name: impl Into<String>, image: Image, generation: u64) -> bool {
        let name = name.into();
        let mut inner = self.lock();
        if inner.generation != generation {
            inner.stats.discarded += 1;
            debug!(name = %name, generation, current = inner.generation, "stale preview write dropped");
            return false;
        }
        inner.entries.insert(name, image);
        true
    }

    /// Returns the stored preview for `filter`, rendering it on a miss.
    ///
    /// At most one render per name runs for a given base image; concurrent
    /// callers wait for it and share its result.
    pub fn get_or_render(&self, filter: &dyn Filter) -> GalleryResult<Image> {
        let name = filter.name();
        let (cell, base, leader) = {
            let mut inner = self.lock();
            if let Some(image) = inner.entries.get(name).cloned() {
                inner.stats.hits += 1;
                trace!(name, "preview hit");
                return Ok(image);
            }
            let base = inner.base.clone().ok_or(GalleryError::NoBaseImage)?;
            inner.stats.misses += 1;
            let generation = inner.generation;
            let pending = inner
                .in_flight
                .get(name)
                .filter(|c| c.generation == generation)
                .cloned();
            match pending {
                Some(cell) => (cell, base, false),
                None => {
                    let cell = Arc::new(InFlight::new(generation));
                    inner.in_flight.insert(name.to_string(), Arc::clone(&cell));
                    (cell, base, true)
                }
            }
        };

        if !leader {
            trace!(name, "waiting for in-flight render");
            return match cell.wait() {
                Some(result) => result.map_err(GalleryError::from),
                None => Err(GalleryError::Abandoned {
                    name: name.to_string(),
                }),
            };
        }

        debug!(name, generation = cell.generation, "rendering preview");
        let guard = Leader {
            cache: self,
            name,
            cell,
            finished: false,
        };
        let result = filter.apply(&base);
        guard.finish(&result);
        result.map_err(GalleryError::from)
    }

    /// Whether a preview for `name` is stored.
    pub fn contains(&self, name: &str) -> bool {
        self.lock().entries.contains_key(name)
    }

    /// Number of stored previews.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// `true` if no previews are stored.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Snapshot of the statistics.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats.clone()
    }
}
