//! Auto-advance scheduling
//!
//! The scheduler owns a single repeating timer slot. It never captures the
//! advance behaviour: a due tick is handed back to the engine, which calls
//! whatever `next` is current at that moment.

use std::time::Duration;

use crate::effects::{Effects, Schedule, TimerKind, TimerSlot, TimerToken};
use crate::state::CarouselState;

/// Autoplay runs only while enabled, not dragging and not hovered.
pub fn should_run(state: &CarouselState) -> bool {
    state.is_auto_playing && !state.is_dragging && !state.is_hovered
}

#[derive(Debug, Clone)]
pub struct AutoAdvanceScheduler {
    period: Duration,
    /// Period the live timer was started with.
    armed_period: Option<Duration>,
    timer: TimerSlot,
}

impl AutoAdvanceScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            armed_period: None,
            timer: TimerSlot::new(TimerKind::AutoAdvance),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_armed()
    }

    /// Bring the timer in line with the state. Restarts only when the run
    /// condition or the period changed, so there is never more than one live
    /// timer.
    pub fn reconcile(&mut self, state: &CarouselState) -> Effects {
        let mut effects = Effects::new();
        let run = should_run(state);
        let up_to_date = match self.armed_period {
            Some(period) => run && period == self.period,
            None => !run,
        };
        if up_to_date {
            return effects;
        }

        self.timer.disarm(&mut effects);
        self.armed_period = None;
        if run {
            self.timer.arm(Schedule::Every(self.period), &mut effects);
            self.armed_period = Some(self.period);
            tracing::debug!(period_ms = self.period.as_millis() as u64, "autoplay started");
        } else {
            tracing::debug!("autoplay paused");
        }
        effects
    }

    /// Change the interval; a running timer restarts with the new period.
    pub fn set_period(&mut self, period: Duration, state: &CarouselState) -> Effects {
        self.period = period;
        self.reconcile(state)
    }

    /// Check a tick against the live timer.
    pub fn accept_tick(&mut self, token: TimerToken) -> bool {
        self.timer.accept(token, true)
    }

    pub fn teardown(&mut self) -> Effects {
        let mut effects = Effects::new();
        self.timer.disarm(&mut effects);
        self.armed_period = None;
        effects
    }
}
