//! Canonical carousel state and its transitions
//!
//! [`StateStore`] is the single writer of [`CarouselState`]. Every transition
//! runs to completion synchronously and returns a [`Transition`]: the state
//! after the change plus whatever deferred work it requested.
//!
//! Drag sign convention: `drag_offset = position - drag_start_x`. Dragging the
//! content to the left produces a **negative** offset and reveals the next
//! card, so a committed negative offset navigates **forward** (`next`) and a
//! committed positive offset navigates **backward** (`prev`).

use std::time::Duration;

use carousel_model::defaults;

use crate::effects::{Effects, Schedule, TimerKind, TimerSlot, TimerToken};

/// Movement beyond this many pixels marks the drag as a real drag, which
/// suppresses the trailing click.
pub const HAS_DRAGGED_THRESHOLD: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselState {
    /// Logical position in `[0, N)`.
    pub current_index: usize,
    pub is_dragging: bool,
    pub drag_start_x: f32,
    /// Signed pixel displacement; zero whenever no drag is in progress.
    pub drag_offset: f32,
    pub is_auto_playing: bool,
    pub is_hovered: bool,
    /// Sticky for the current drag and the grace period after it.
    pub has_dragged: bool,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self {
            current_index: 0,
            is_dragging: false,
            drag_start_x: 0.0,
            drag_offset: 0.0,
            is_auto_playing: true,
            is_hovered: false,
            has_dragged: false,
        }
    }
}

/// Result of a single state transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: CarouselState,
    pub effects: Effects,
}

#[derive(Debug, Clone)]
pub struct StateStore {
    state: CarouselState,
    len: usize,
    min_drag_distance: f32,
    grace_period: Duration,
    drag_reset: TimerSlot,
}

impl StateStore {
    pub fn new(len: usize) -> Self {
        Self {
            state: CarouselState::default(),
            len,
            min_drag_distance: defaults::MIN_DRAG_DISTANCE,
            grace_period: Duration::from_millis(defaults::GRACE_PERIOD_MS),
            drag_reset: TimerSlot::new(TimerKind::DragReset),
        }
    }

    pub fn with_min_drag_distance(mut self, distance: f32) -> Self {
        self.min_drag_distance = distance;
        self
    }

    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub fn set_min_drag_distance(&mut self, distance: f32) {
        self.min_drag_distance = distance;
    }

    pub fn set_grace_period(&mut self, grace_period: Duration) {
        self.grace_period = grace_period;
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn finish(&self, effects: Effects) -> Transition {
        Transition {
            state: self.state,
            effects,
        }
    }

    pub fn go_to_slide(&mut self, index: isize) -> Transition {
        if self.len == 0 {
            return self.finish(Effects::new());
        }
        let normalized = index.rem_euclid(self.len as isize) as usize;
        self.state.current_index = normalized;
        self.state.drag_offset = 0.0;
        self.finish(Effects::new())
    }

    pub fn next(&mut self) -> Transition {
        self.go_to_slide(self.state.current_index as isize + 1)
    }

    pub fn prev(&mut self) -> Transition {
        self.go_to_slide(self.state.current_index as isize - 1)
    }

    pub fn start_drag(&mut self, position: f32) -> Transition {
        let mut effects = Effects::new();
        self.drag_reset.disarm(&mut effects);

        self.state.is_dragging = true;
        self.state.drag_start_x = position;
        self.state.drag_offset = 0.0;
        self.state.has_dragged = false;
        self.state.is_auto_playing = false;
        self.finish(effects)
    }

    pub fn update_drag(&mut self, position: f32) -> Transition {
        if !self.state.is_dragging {
            return self.finish(Effects::new());
        }
        self.state.drag_offset = position - self.state.drag_start_x;
        self.state.has_dragged |= self.state.drag_offset.abs() > HAS_DRAGGED_THRESHOLD;
        self.finish(Effects::new())
    }

    pub fn end_drag(&mut self) -> Transition {
        if !self.state.is_dragging {
            return self.finish(Effects::new());
        }

        let offset = self.state.drag_offset;
        let distance = offset.abs();
        if distance >= self.min_drag_distance && offset != 0.0 {
            if offset < 0.0 {
                self.next();
            } else {
                self.prev();
            }
            tracing::debug!(
                offset,
                index = self.state.current_index,
                "drag committed"
            );
        } else {
            tracing::trace!(offset, "drag below threshold, snapping back");
        }

        self.state.is_dragging = false;
        self.state.drag_offset = 0.0;
        self.state.is_auto_playing = !self.state.is_hovered;

        let mut effects = Effects::new();
        if self.state.has_dragged {
            self.drag_reset.arm(Schedule::After(self.grace_period), &mut effects);
        }
        self.finish(effects)
    }

    pub fn set_hovered(&mut self, hovered: bool) -> Transition {
        self.state.is_hovered = hovered;
        self.state.is_auto_playing = if hovered {
            false
        } else {
            !self.state.is_dragging
        };
        self.finish(Effects::new())
    }

    pub fn set_auto_play(&mut self, enable: bool) -> Transition {
        self.state.is_auto_playing =
            enable && !self.state.is_hovered && !self.state.is_dragging;
        self.finish(Effects::new())
    }

    /// Deliver the deferred `has_dragged` reset. Returns false for a stale token.
    pub fn clear_has_dragged(&mut self, token: TimerToken) -> bool {
        if !self.drag_reset.accept(token, false) {
            return false;
        }
        self.state.has_dragged = false;
        true
    }

    /// Cancel the pending `has_dragged` reset, if any.
    pub fn teardown(&mut self) -> Effects {
        let mut effects = Effects::new();
        self.drag_reset.disarm(&mut effects);
        effects
    }
}
