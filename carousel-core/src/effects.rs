//! Requested side effects
//!
//! Transitions never start or stop timers themselves. They return an
//! [`Effects`] list describing the scheduling work the host must perform, and
//! the host hands due timers back through `Carousel::fire`. Every scheduled
//! callback carries a [`TimerToken`]; a token is only honoured while its slot
//! still holds the same generation, so a superseded, cancelled or post-dispose
//! callback is detected and ignored.

use std::time::Duration;

/// The three deferred callbacks the engine can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Repeating auto-advance tick.
    AutoAdvance,
    /// One-shot reset of the post-drag click suppression flag.
    DragReset,
    /// One-shot re-enable of transitions after a wrap frame.
    TransitionRestore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
}

/// When a scheduled callback should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Repeatedly, first after one period.
    Every(Duration),
    /// Once, after the delay.
    After(Duration),
    /// Once, after the frame currently being rendered has been committed.
    NextFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Schedule { token: TimerToken, when: Schedule },
    Cancel(TimerToken),
}

impl Effect {
    pub fn token(&self) -> TimerToken {
        match self {
            Effect::Schedule { token, .. } | Effect::Cancel(token) => *token,
        }
    }
}

/// Ordered list of effects produced by a single input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects(Vec<Effect>);

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.0.push(effect);
    }

    pub fn append(&mut self, mut other: Effects) {
        self.0.append(&mut other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Effect> {
        self.0.iter()
    }

    /// True when a schedule request for `kind` is present.
    pub fn schedules(&self, kind: TimerKind) -> bool {
        self.0.iter().any(|effect| {
            matches!(effect, Effect::Schedule { token, .. } if token.kind == kind)
        })
    }

    /// True when a cancellation for `kind` is present.
    pub fn cancels(&self, kind: TimerKind) -> bool {
        self.0
            .iter()
            .any(|effect| matches!(effect, Effect::Cancel(token) if token.kind == kind))
    }
}

impl IntoIterator for Effects {
    type Item = Effect;
    type IntoIter = std::vec::IntoIter<Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Effects {
    type Item = &'a Effect;
    type IntoIter = std::slice::Iter<'a, Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Effect> for Effects {
    fn from(effect: Effect) -> Self {
        Effects(vec![effect])
    }
}

/// Owner-side bookkeeping for one kind of deferred callback.
///
/// At most one generation is live at a time. Arming a slot that is already
/// live cancels the previous token first.
#[derive(Debug, Clone)]
pub struct TimerSlot {
    kind: TimerKind,
    generation: u64,
    live: bool,
}

impl TimerSlot {
    pub fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            generation: 0,
            live: false,
        }
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn is_armed(&self) -> bool {
        self.live
    }

    fn current(&self) -> TimerToken {
        TimerToken {
            kind: self.kind,
            generation: self.generation,
        }
    }

    /// Supersede any live token and schedule a fresh one.
    pub fn arm(&mut self, when: Schedule, effects: &mut Effects) -> TimerToken {
        self.disarm(effects);
        self.generation = self.generation.wrapping_add(1);
        self.live = true;
        let token = self.current();
        effects.push(Effect::Schedule { token, when });
        token
    }

    /// Cancel the live token, if any.
    pub fn disarm(&mut self, effects: &mut Effects) {
        if self.live {
            self.live = false;
            effects.push(Effect::Cancel(self.current()));
        }
    }

    /// Check a firing token against the live generation. One-shot slots are
    /// consumed by a successful fire; repeating slots stay armed.
    pub fn accept(&mut self, token: TimerToken, repeating: bool) -> bool {
        if !self.live || token != self.current() {
            return false;
        }
        if !repeating {
            self.live = false;
        }
        true
    }
}
