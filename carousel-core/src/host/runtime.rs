//! Tokio host
//!
//! A single task owns the [`Carousel`]. Inputs arrive over an `mpsc` channel
//! and are applied strictly in arrival order; timers are slept on in the same
//! `select!` loop, so a timer callback can never interleave with an input.
//! Every change is published as a [`RenderFrame`] on a `watch` channel.
//! Dropping the [`CarouselRuntime`] or calling
//! [`CarouselRuntime::shutdown`] disposes the carousel and cancels all timers.

use std::time::Duration;

use carousel_model::CarouselSettings;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use crate::effects::{Effect, Effects, Schedule};
use crate::engine::{Carousel, FireOutcome, ItemActivation, NavKey, RenderFrame};

use super::queue::TimerQueue;

/// Sleep used when no timer is pending.
const IDLE_WAIT: Duration = Duration::from_secs(3600);

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("Carousel runtime has stopped")]
    Closed,

    #[error("Carousel runtime task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Delay standing in for "after the next frame" when restoring transitions.
    pub frame_interval: Duration,
    pub command_buffer: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            command_buffer: 64,
        }
    }
}

#[derive(Debug)]
pub enum Command {
    PointerDown(f32),
    PointerMove(f32),
    PointerUp,
    PointerCancel,
    PointerLeave,
    TouchStart(Vec<f32>),
    TouchMove(Vec<f32>),
    TouchEnd,
    HoverEnter,
    HoverLeave,
    GoTo(isize),
    Next,
    Prev,
    SetAutoPlay(bool),
    Key(NavKey),
    ViewportWidth(f32),
    Reconfigure(CarouselSettings),
    Activate {
        slot: usize,
        reply: oneshot::Sender<Option<ItemActivation>>,
    },
}

#[derive(Debug)]
pub struct CarouselRuntime {
    commands: mpsc::Sender<Command>,
    frames: watch::Receiver<RenderFrame>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Carousel>>,
}

impl CarouselRuntime {
    /// Spawn the owning task on the current tokio runtime.
    pub fn spawn(carousel: Carousel, config: RuntimeConfig) -> Self {
        let (command_tx, command_rx) = mpsc::channel(config.command_buffer.max(1));
        let (frame_tx, frame_rx) = watch::channel(carousel.render_frame());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(run(carousel, command_rx, shutdown_rx, frame_tx, config));

        Self {
            commands: command_tx,
            frames: frame_rx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Subscribe to published frames.
    pub fn frames(&self) -> watch::Receiver<RenderFrame> {
        self.frames.clone()
    }

    /// Most recently published frame.
    pub fn frame(&self) -> RenderFrame {
        self.frames.borrow().clone()
    }

    pub async fn send(&self, command: Command) -> Result<(), RuntimeError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| RuntimeError::Closed)
    }

    /// Resolve a click on a physical slot, honouring drag suppression.
    pub async fn activate(&self, slot: usize) -> Result<Option<ItemActivation>, RuntimeError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Activate { slot, reply }).await?;
        response.await.map_err(|_| RuntimeError::Closed)
    }

    /// Stop the task, dispose the carousel and hand it back.
    pub async fn shutdown(mut self) -> Result<Carousel, RuntimeError> {
        if let Some(signal) = self.shutdown.take() {
            let _ = signal.send(());
        }
        let task = self.task.take().ok_or(RuntimeError::Closed)?;
        Ok(task.await?)
    }
}

async fn run(
    mut carousel: Carousel,
    mut commands: mpsc::Receiver<Command>,
    mut shutdown: oneshot::Receiver<()>,
    frames: watch::Sender<RenderFrame>,
    config: RuntimeConfig,
) -> Carousel {
    let origin = Instant::now();
    let mut timers = TimerQueue::new();

    let effects = carousel.mount();
    timers.execute(effects, origin.elapsed());
    publish(&carousel, &frames, &mut timers, origin, config.frame_interval);

    loop {
        let deadline = timers.next_due().map(|due| origin + due);
        let wake = sleep_until(deadline.unwrap_or_else(|| Instant::now() + IDLE_WAIT));

        tokio::select! {
            _ = &mut shutdown => break,
            command = commands.recv() => {
                let Some(command) = command else { break };
                let effects = apply(&mut carousel, command);
                timers.execute(effects, origin.elapsed());
            }
            _ = wake, if deadline.is_some() => {
                let now = origin.elapsed();
                while let Some((token, due)) = timers.pop_due(now) {
                    if let FireOutcome::Applied(effects) = carousel.fire(token) {
                        timers.execute(effects, due);
                    }
                }
            }
        }

        publish(&carousel, &frames, &mut timers, origin, config.frame_interval);
    }

    let effects = carousel.dispose();
    tracing::debug!(cancelled = effects.len(), "carousel runtime stopping");
    timers.clear();
    carousel
}

fn apply(carousel: &mut Carousel, command: Command) -> Effects {
    match command {
        Command::PointerDown(x) => carousel.on_pointer_down(x),
        Command::PointerMove(x) => carousel.on_pointer_move(x),
        Command::PointerUp => carousel.on_pointer_up(),
        Command::PointerCancel => carousel.on_pointer_cancel(),
        Command::PointerLeave => carousel.on_pointer_leave_while_active(),
        Command::TouchStart(touches) => carousel.on_touch_start(&touches),
        Command::TouchMove(touches) => carousel.on_touch_move(&touches),
        Command::TouchEnd => carousel.on_touch_end(),
        Command::HoverEnter => carousel.on_hover_enter(),
        Command::HoverLeave => carousel.on_hover_leave(),
        Command::GoTo(index) => carousel.go_to(index),
        Command::Next => carousel.next(),
        Command::Prev => carousel.prev(),
        Command::SetAutoPlay(enable) => carousel.set_auto_play(enable),
        Command::Key(key) => carousel.on_key(key),
        Command::ViewportWidth(width) => {
            carousel.set_viewport_width(width);
            Effects::new()
        }
        Command::Reconfigure(settings) => carousel.reconfigure(settings),
        Command::Activate { slot, reply } => {
            let _ = reply.send(carousel.activate(slot));
            Effects::new()
        }
    }
}

/// Publish the current frame, then start the clock on callbacks that were
/// waiting for it.
fn publish(
    carousel: &Carousel,
    frames: &watch::Sender<RenderFrame>,
    timers: &mut TimerQueue,
    origin: Instant,
    frame_interval: Duration,
) {
    let frame = carousel.render_frame();
    frames.send_if_modified(move |current| {
        if *current == frame {
            false
        } else {
            *current = frame;
            true
        }
    });

    let now = origin.elapsed();
    for token in timers.take_after_frame() {
        timers.execute(
            Effect::Schedule {
                token,
                when: Schedule::After(frame_interval),
            }
            .into(),
            now,
        );
    }
}
