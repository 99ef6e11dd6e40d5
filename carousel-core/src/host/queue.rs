//! Pending timer bookkeeping shared by the hosts
//!
//! Times are offsets from the host's own origin, so the same queue serves the
//! virtual clock and the tokio runtime.

use std::time::Duration;

use crate::effects::{Effect, Effects, Schedule, TimerToken};

/// Lower bound for repeating periods so a zero interval cannot spin.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    token: TimerToken,
    due: Duration,
    period: Option<Duration>,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<Pending>,
    after_frame: Vec<TimerToken>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply schedule and cancel requests in order.
    pub fn execute(&mut self, effects: Effects, now: Duration) {
        for effect in effects {
            match effect {
                Effect::Cancel(token) => self.cancel(token),
                Effect::Schedule { token, when } => match when {
                    Schedule::Every(period) => {
                        let period = period.max(MIN_PERIOD);
                        self.pending.push(Pending {
                            token,
                            due: now + period,
                            period: Some(period),
                        });
                    }
                    Schedule::After(delay) => self.pending.push(Pending {
                        token,
                        due: now + delay,
                        period: None,
                    }),
                    Schedule::NextFrame => self.after_frame.push(token),
                },
            }
        }
    }

    pub fn cancel(&mut self, token: TimerToken) {
        self.pending.retain(|p| p.token != token);
        self.after_frame.retain(|t| *t != token);
    }

    /// Earliest due time among time-based timers.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Take the earliest timer due at or before `now`, with the time it was due.
    /// Repeating timers are rescheduled one period later.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerToken, Duration)> {
        let (position, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= now)
            .min_by_key(|(_, p)| p.due)?;

        let entry = &mut self.pending[position];
        let fired = (entry.token, entry.due);
        if let Some(period) = entry.period {
            entry.due += period;
        } else {
            self.pending.remove(position);
        }
        Some(fired)
    }

    /// Drain callbacks waiting for the current frame to be committed.
    pub fn take_after_frame(&mut self) -> Vec<TimerToken> {
        std::mem::take(&mut self.after_frame)
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.after_frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.after_frame.clear();
    }
}
