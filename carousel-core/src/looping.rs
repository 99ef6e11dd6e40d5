//! Infinite-loop index virtualization
//!
//! The renderer draws a padded sequence: one copy of the last item in front of
//! the real items, and one or more copies of the leading items behind them.
//! The sequence is described purely by indices into the real collection; no
//! item is ever cloned.
//!
//! ```text
//! slot:     0      1     2          N      N+1    (N+2 ...)
//! item:   [N-1]   [0]   [1]  ...  [N-1]   [0]    ([1] ...)
//! ```
//!
//! Logical index `i` is always rendered at physical slot `i + 1`.

use crate::effects::{Effects, Schedule, TimerKind, TimerSlot, TimerToken};
use crate::layout::MAX_VISIBLE_COUNT;
use crate::state::CarouselState;

/// Trailing pad slots for a visible count: `max(1, ceil(visible) - 1)`.
///
/// The count is clamped to [`MAX_VISIBLE_COUNT`]; NaN counts as zero.
pub fn trailing_pad(visible_count: f32) -> usize {
    let visible = visible_count.max(0.0).min(MAX_VISIBLE_COUNT).ceil() as usize;
    visible.saturating_sub(1).max(1)
}

/// Physical slot holding the active card for a logical index.
pub fn physical_slot(logical: usize) -> usize {
    logical + 1
}

/// Last to first or first to last.
pub fn is_wrap(previous: usize, next: usize, len: usize) -> bool {
    if len < 2 {
        return false;
    }
    let last = len - 1;
    (previous == last && next == 0) || (previous == 0 && next == last)
}

#[derive(Debug, Clone)]
pub struct LoopIndexer {
    len: usize,
    transition_enabled: bool,
    restore: TimerSlot,
}

impl LoopIndexer {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            transition_enabled: true,
            restore: TimerSlot::new(TimerKind::TransitionRestore),
        }
    }

    pub fn transition_enabled(&self) -> bool {
        self.transition_enabled
    }

    pub fn padded_len(&self, visible_count: f32) -> usize {
        if self.len == 0 {
            return 0;
        }
        self.len
            .saturating_add(1)
            .saturating_add(trailing_pad(visible_count))
    }

    /// Real-collection index for each physical slot.
    pub fn padded_indices(&self, visible_count: f32) -> Vec<usize> {
        (0..self.padded_len(visible_count))
            .filter_map(|slot| self.logical_for_slot(slot, visible_count))
            .collect()
    }

    /// Resolve a physical slot back to the real item it shows.
    pub fn logical_for_slot(&self, slot: usize, visible_count: f32) -> Option<usize> {
        if slot >= self.padded_len(visible_count) {
            return None;
        }
        Some(match slot {
            0 => self.len - 1,
            s => (s - 1) % self.len,
        })
    }

    /// Inspect an index change and request wrap suppression when needed.
    ///
    /// Drags in progress, or any residual drag offset, bypass wrap handling.
    pub fn observe(&mut self, previous: usize, state: &CarouselState) -> Effects {
        let mut effects = Effects::new();
        if previous == state.current_index || state.is_dragging || state.drag_offset != 0.0 {
            return effects;
        }
        if is_wrap(previous, state.current_index, self.len) {
            tracing::debug!(
                from = previous,
                to = state.current_index,
                "wrap transition, suppressing animation for one frame"
            );
            self.transition_enabled = false;
            self.restore.arm(Schedule::NextFrame, &mut effects);
        }
        effects
    }

    /// Deliver the deferred re-enable. Returns false for a stale token.
    pub fn restore(&mut self, token: TimerToken) -> bool {
        if !self.restore.accept(token, false) {
            return false;
        }
        self.transition_enabled = true;
        true
    }

    pub fn teardown(&mut self) -> Effects {
        let mut effects = Effects::new();
        self.restore.disarm(&mut effects);
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Effect;

    fn at(index: usize) -> CarouselState {
        CarouselState {
            current_index: index,
            ..CarouselState::default()
        }
    }

    #[test]
    fn padded_sequence_for_two_visible() {
        let idx = LoopIndexer::new(5);
        assert_eq!(idx.padded_indices(2.0), vec![4, 0, 1, 2, 3, 4, 0]);
        assert_eq!(idx.padded_indices(1.5), vec![4, 0, 1, 2, 3, 4, 0]);
        assert_eq!(idx.padded_indices(1.0), vec![4, 0, 1, 2, 3, 4, 0]);
    }

    #[test]
    fn padded_sequence_grows_with_visible_count() {
        let idx = LoopIndexer::new(5);
        assert_eq!(idx.padded_indices(3.0), vec![4, 0, 1, 2, 3, 4, 0, 1]);
        assert_eq!(idx.padded_indices(2.5), vec![4, 0, 1, 2, 3, 4, 0, 1]);
        // Pads longer than the collection keep cycling.
        let small = LoopIndexer::new(3);
        assert_eq!(small.padded_indices(5.0), vec![2, 0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn unbounded_visible_counts_are_capped() {
        let cap = MAX_VISIBLE_COUNT as usize - 1;
        assert_eq!(trailing_pad(f32::INFINITY), cap);
        assert_eq!(trailing_pad(1e30), cap);
        assert_eq!(trailing_pad(f32::NAN), 1);
        assert_eq!(trailing_pad(-3.0), 1);

        let idx = LoopIndexer::new(5);
        assert_eq!(idx.padded_len(f32::INFINITY), 5 + 1 + cap);
        assert_eq!(idx.padded_indices(4e9).len(), 5 + 1 + cap);
    }

    #[test]
    fn padded_len_saturates() {
        let idx = LoopIndexer::new(usize::MAX);
        assert_eq!(idx.padded_len(3.0), usize::MAX);
    }

    #[test]
    fn empty_collection_has_no_slots() {
        let idx = LoopIndexer::new(0);
        assert!(idx.padded_indices(3.0).is_empty());
        assert_eq!(idx.logical_for_slot(0, 3.0), None);
    }

    #[test]
    fn active_slot_shows_logical_item() {
        let idx = LoopIndexer::new(5);
        let padded = idx.padded_indices(2.0);
        for logical in 0..5 {
            assert_eq!(padded[physical_slot(logical)], logical);
        }
    }

    #[test]
    fn wrap_detection() {
        assert!(is_wrap(4, 0, 5));
        assert!(is_wrap(0, 4, 5));
        assert!(!is_wrap(3, 4, 5));
        assert!(!is_wrap(2, 0, 5));
        assert!(!is_wrap(0, 0, 1));
    }

    #[test]
    fn wrap_suppresses_then_restores() {
        let mut idx = LoopIndexer::new(5);
        let effects = idx.observe(4, &at(0));
        assert!(!idx.transition_enabled());
        let token = match effects.iter().next() {
            Some(Effect::Schedule { token, when: Schedule::NextFrame }) => *token,
            other => panic!("expected next-frame schedule, got {other:?}"),
        };
        assert!(idx.restore(token));
        assert!(idx.transition_enabled());
        assert!(!idx.restore(token), "restore token is single use");
    }

    #[test]
    fn fresh_wrap_supersedes_pending_restore() {
        let mut idx = LoopIndexer::new(5);
        let first = idx.observe(4, &at(0));
        let second = idx.observe(0, &at(4));
        assert!(second.cancels(TimerKind::TransitionRestore));
        let stale = first.iter().next().map(Effect::token);
        assert!(stale.is_some_and(|t| !idx.restore(t)));
        assert!(!idx.transition_enabled());
    }

    #[test]
    fn dragging_bypasses_wrap_handling() {
        let mut idx = LoopIndexer::new(5);
        let dragging = CarouselState {
            is_dragging: true,
            ..at(0)
        };
        assert!(idx.observe(4, &dragging).is_empty());
        let offset = CarouselState {
            drag_offset: -12.0,
            ..at(0)
        };
        assert!(idx.observe(4, &offset).is_empty());
        assert!(idx.transition_enabled());
    }

    #[test]
    fn ordinary_step_keeps_animation() {
        let mut idx = LoopIndexer::new(5);
        assert!(idx.observe(1, &at(2)).is_empty());
        assert!(idx.transition_enabled());
    }
}
