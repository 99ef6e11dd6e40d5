//! Pointer gesture tracking
//!
//! Mouse and touch are both reduced to one `(start, move, end)` stream of
//! primary contact positions. Ending, cancelling and leaving the surface while
//! a drag is active all converge on [`StateStore::end_drag`], so a drag can
//! never be left hanging.

use crate::state::{StateStore, Transition};

/// Why a drag ended. Only used for diagnostics; all reasons commit the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEnd {
    Release,
    Cancel,
    Leave,
}

#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    /// A drag started through this tracker is in progress.
    active: bool,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self, store: &mut StateStore, position: f32) -> Option<Transition> {
        if self.active || store.state().is_dragging {
            return None;
        }
        self.active = true;
        Some(store.start_drag(position))
    }

    pub fn moved(&mut self, store: &mut StateStore, position: f32) -> Option<Transition> {
        if !self.active {
            return None;
        }
        let transition = store.update_drag(position);
        tracing::trace!(offset = transition.state.drag_offset, "drag moved");
        Some(transition)
    }

    pub fn end(&mut self, store: &mut StateStore, reason: DragEnd) -> Option<Transition> {
        if !self.active {
            return None;
        }
        self.active = false;
        tracing::trace!(?reason, "drag ended");
        Some(store.end_drag())
    }

    /// Touch start with the full contact list; the first contact drives the drag.
    pub fn touch_start(&mut self, store: &mut StateStore, touches: &[f32]) -> Option<Transition> {
        let primary = touches.first().copied()?;
        self.start(store, primary)
    }

    pub fn touch_move(&mut self, store: &mut StateStore, touches: &[f32]) -> Option<Transition> {
        let primary = touches.first().copied()?;
        self.moved(store, primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redundant_start_is_ignored() {
        let mut store = StateStore::new(5);
        let mut tracker = GestureTracker::new();
        assert!(tracker.start(&mut store, 10.0).is_some());
        assert!(tracker.start(&mut store, 99.0).is_none());
        assert_eq!(store.state().drag_start_x, 10.0);
    }

    #[test]
    fn move_without_start_is_ignored() {
        let mut store = StateStore::new(5);
        let mut tracker = GestureTracker::new();
        assert!(tracker.moved(&mut store, 50.0).is_none());
        assert_eq!(store.state().drag_offset, 0.0);
    }

    #[test]
    fn leave_commits_like_release() {
        let mut released = StateStore::new(5);
        let mut left = StateStore::new(5);
        for (store, reason) in [(&mut released, DragEnd::Release), (&mut left, DragEnd::Leave)] {
            let mut tracker = GestureTracker::new();
            tracker.start(store, 200.0);
            tracker.moved(store, 140.0);
            tracker.end(store, reason);
            assert!(!tracker.is_active());
        }
        assert_eq!(released.state(), left.state());
        assert_eq!(left.state().current_index, 1);
        assert!(!left.state().is_dragging);
    }

    #[test]
    fn end_twice_is_noop() {
        let mut store = StateStore::new(5);
        let mut tracker = GestureTracker::new();
        tracker.start(&mut store, 0.0);
        assert!(tracker.end(&mut store, DragEnd::Cancel).is_some());
        assert!(tracker.end(&mut store, DragEnd::Release).is_none());
    }

    #[test]
    fn touch_uses_first_contact() {
        let mut store = StateStore::new(5);
        let mut tracker = GestureTracker::new();
        assert!(tracker.touch_start(&mut store, &[]).is_none());
        tracker.touch_start(&mut store, &[30.0, 400.0]);
        tracker.touch_move(&mut store, &[80.0, 10.0]);
        assert_eq!(store.state().drag_offset, 50.0);
    }
}
