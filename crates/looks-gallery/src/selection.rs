//! Single selection with transient highlight over a gallery.
//!
//! The controller tracks three things:
//!
//! - the *applied* index: the look currently applied to the photo. It only
//!   changes through [`SelectionController::commit`].
//! - the *current* index: the look being shown, changed by picks.
//! - the [`SelectionState`]: what the user is doing right now.
//!
//! Every pick and deselect notifies observers with `(new, previous)` where
//! `previous` is the applied index.
//!
//! ```text
//!                 attach                   pick(i)
//! NoneSelected ----------> Selected(a) ---------------> Selected(i)
//!                              ^  |                         |
//!                   deselect() |  | highlight(j)            | highlight(j)
//!                              |  v                         v
//!                          Highlighted(j) <------------ Highlighted(j)
//! ```

use crate::{GalleryError, GalleryResult};
use std::fmt;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Where the user is in the pick/browse cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing attached yet.
    #[default]
    NoneSelected,
    /// A look is picked and shown.
    Selected(usize),
    /// The user is browsing over a look without committing to it.
    Highlighted(usize),
}

/// Receives selection changes.
pub trait SelectionObserver: Send {
    /// A look was selected; `previous` is the applied index at the time.
    fn selection_changed(&mut self, index: usize, previous: usize);

    /// Asks presentation to scroll `index` into view.
    fn reveal(&mut self, _index: usize) {}
}

impl<F> SelectionObserver for F
where
    F: FnMut(usize, usize) + Send,
{
    fn selection_changed(&mut self, index: usize, previous: usize) {
        self(index, previous)
    }
}

/// Selection state machine over a gallery of `len` looks.
pub struct SelectionController {
    len: usize,
    applied: usize,
    current: usize,
    state: SelectionState,
    observers: Vec<Box<dyn SelectionObserver>>,
}

impl SelectionController {
    /// Creates a controller whose applied look is `initial`.
    pub fn new(len: usize, initial: usize) -> GalleryResult<Self> {
        if initial >= len {
            return Err(GalleryError::InitialOutOfRange { index: initial, len });
        }
        Ok(Self {
            len,
            applied: initial,
            current: initial,
            state: SelectionState::NoneSelected,
            observers: Vec::new(),
        })
    }

    fn check(&self, index: usize) -> GalleryResult<()> {
        if index < self.len {
            Ok(())
        } else {
            Err(GalleryError::IndexOutOfRange { index, len: self.len })
        }
    }

    fn notify(&mut self, index: usize, previous: usize) {
        trace!(index, previous, observers = self.observers.len(), "selection changed");
        for observer in &mut self.observers {
            observer.selection_changed(index, previous);
        }
    }

    /// Registers an observer, selects the applied look and notifies every
    /// observer with `(applied, applied)`.
    pub fn attach(&mut self, observer: impl SelectionObserver + 'static) {
        self.observers.push(Box::new(observer));
        self.current = self.applied;
        self.state = SelectionState::Selected(self.applied);
        debug!(applied = self.applied, "selection attached");
        self.notify(self.applied, self.applied);
    }

    /// Picks look `index` and notifies `(index, applied)`.
    ///
    /// Non-original looks are also revealed.
    pub fn pick(&mut self, index: usize) -> GalleryResult<()> {
        self.check(index)?;
        let previous = self.applied;
        self.current = index;
        self.state = SelectionState::Selected(index);
        debug!(index, previous, "pick");
        self.notify(index, previous);
        if index != 0 {
            for observer in &mut self.observers {
                observer.reveal(index);
            }
        }
        Ok(())
    }

    /// Highlights look `index` while browsing. Nothing is notified and the
    /// shown look does not change.
    pub fn highlight(&mut self, index: usize) -> GalleryResult<()> {
        self.check(index)?;
        self.state = SelectionState::Highlighted(index);
        trace!(index, "highlight");
        Ok(())
    }

    /// Drops any highlight or pending pick and re-selects the applied look,
    /// notifying `(applied, applied)`.
    pub fn deselect(&mut self) {
        self.current = self.applied;
        self.state = SelectionState::Selected(self.applied);
        debug!(applied = self.applied, "deselect");
        self.notify(self.applied, self.applied);
    }

    /// Makes the shown look the applied one. Returns the applied index.
    pub fn commit(&mut self) -> usize {
        if self.applied != self.current {
            debug!(from = self.applied, to = self.current, "commit");
        }
        self.applied = self.current;
        self.state = SelectionState::Selected(self.current);
        self.applied
    }

    /// Index of the look applied to the photo.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Index of the look being shown.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Highlighted index, if browsing.
    pub fn highlighted(&self) -> Option<usize> {
        match self.state {
            SelectionState::Highlighted(i) => Some(i),
            _ => None,
        }
    }

    /// Current state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Gallery length this controller was built for.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` for a zero-length gallery, which [`new`](Self::new) rejects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionController")
            .field("len", &self.len)
            .field("applied", &self.applied)
            .field("current", &self.current)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<(usize, usize)>>>;

    fn recorder() -> (Log, impl FnMut(usize, usize) + Send + 'static) {
        let log: Log = Arc::default();
        let sink = Arc::clone(&log);
        (log, move |i, p| sink.lock().unwrap().push((i, p)))
    }

    #[derive(Default)]
    struct Revealer {
        revealed: Arc<Mutex<Vec<usize>>>,
    }

    impl SelectionObserver for Revealer {
        fn selection_changed(&mut self, _index: usize, _previous: usize) {}

        fn reveal(&mut self, index: usize) {
            self.revealed.lock().unwrap().push(index);
        }
    }

    #[test]
    fn test_attach_emits_initial() {
        let (log, observer) = recorder();
        let mut sel = SelectionController::new(5, 2).unwrap();
        assert_eq!(sel.state(), SelectionState::NoneSelected);
        sel.attach(observer);
        assert_eq!(*log.lock().unwrap(), vec![(2, 2)]);
        assert_eq!(sel.state(), SelectionState::Selected(2));
    }

    #[test]
    fn test_pick_then_deselect() {
        let (log, observer) = recorder();
        let mut sel = SelectionController::new(5, 2).unwrap();
        sel.attach(observer);
        sel.pick(0).unwrap();
        sel.deselect();
        assert_eq!(*log.lock().unwrap(), vec![(2, 2), (0, 2), (2, 2)]);
        assert_eq!(sel.highlighted(), None);
        assert_eq!(sel.current(), 2);
    }

    #[test]
    fn test_highlight_is_silent() {
        let (log, observer) = recorder();
        let mut sel = SelectionController::new(3, 0).unwrap();
        sel.attach(observer);
        sel.highlight(2).unwrap();
        assert_eq!(sel.highlighted(), Some(2));
        assert_eq!(sel.current(), 0);
        assert_eq!(log.lock().unwrap().len(), 1);

        sel.deselect();
        assert_eq!(sel.highlighted(), None);
        assert_eq!(sel.state(), SelectionState::Selected(0));
    }

    #[test]
    fn test_commit_moves_applied() {
        let (log, observer) = recorder();
        let mut sel = SelectionController::new(3, 0).unwrap();
        sel.attach(observer);
        sel.pick(1).unwrap();
        assert_eq!(sel.applied(), 0);
        assert_eq!(sel.commit(), 1);
        sel.pick(2).unwrap();
        sel.deselect();
        assert_eq!(*log.lock().unwrap(), vec![(0, 0), (1, 0), (2, 1), (1, 1)]);
    }

    #[test]
    fn test_reveal_only_for_non_original() {
        let revealer = Revealer::default();
        let revealed = Arc::clone(&revealer.revealed);
        let mut sel = SelectionController::new(4, 0).unwrap();
        sel.attach(revealer);
        sel.pick(0).unwrap();
        sel.pick(3).unwrap();
        assert_eq!(*revealed.lock().unwrap(), vec![3]);
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            SelectionController::new(3, 3),
            Err(GalleryError::InitialOutOfRange { index: 3, len: 3 })
        ));
        let mut sel = SelectionController::new(3, 0).unwrap();
        assert!(sel.pick(7).is_err());
        assert!(sel.highlight(3).is_err());
        assert_eq!(sel.state(), SelectionState::NoneSelected);
    }
}
