//! Deterministic host driven by a virtual clock
//!
//! Nothing happens until the embedder advances time or commits a frame, which
//! makes timing behaviour reproducible in tests and in custom frame loops.

use std::time::Duration;

use crate::effects::{Effects, TimerToken};
use crate::engine::{Carousel, FireOutcome, RenderFrame};

use super::queue::TimerQueue;

#[derive(Debug)]
pub struct ManualHost {
    carousel: Carousel,
    timers: TimerQueue,
    now: Duration,
    stale_fires: usize,
}

impl ManualHost {
    /// Take ownership of a carousel and start its timers.
    pub fn new(mut carousel: Carousel) -> Self {
        let effects = carousel.mount();
        let mut host = Self {
            carousel,
            timers: TimerQueue::new(),
            now: Duration::ZERO,
            stale_fires: 0,
        };
        host.execute(effects);
        host
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// Elapsed virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Timers that fired against a superseded or disposed slot.
    pub fn stale_fires(&self) -> usize {
        self.stale_fires
    }

    pub fn execute(&mut self, effects: Effects) {
        self.timers.execute(effects, self.now);
    }

    /// Run an input against the carousel and execute its effects.
    pub fn dispatch<F>(&mut self, input: F)
    where
        F: FnOnce(&mut Carousel) -> Effects,
    {
        let effects = input(&mut self.carousel);
        self.execute(effects);
    }

    pub fn render_frame(&self) -> RenderFrame {
        self.carousel.render_frame()
    }

    /// Render the current frame, then run callbacks that were waiting for it.
    pub fn commit_frame(&mut self) -> RenderFrame {
        let frame = self.carousel.render_frame();
        for token in self.timers.take_after_frame() {
            self.deliver(token);
        }
        frame
    }

    /// Move the clock forward, firing due timers in order. Returns how many
    /// timers fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.now + by;
        let mut fired = 0;
        while let Some((token, due)) = self.timers.pop_due(target) {
            self.now = self.now.max(due);
            self.deliver(token);
            fired += 1;
        }
        self.now = target;
        fired
    }

    fn deliver(&mut self, token: TimerToken) {
        match self.carousel.fire(token) {
            FireOutcome::Applied(effects) => self.execute(effects),
            FireOutcome::Stale => self.stale_fires += 1,
        }
    }

    /// Dispose the carousel and drop every pending timer.
    pub fn dispose(&mut self) {
        let effects = self.carousel.dispose();
        self.execute(effects);
        self.timers.clear();
    }

    pub fn into_inner(self) -> Carousel {
        self.carousel
    }
}
