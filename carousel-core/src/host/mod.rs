//! Hosts execute the effects a carousel requests and deliver due timers back.

pub mod manual;
mod queue;
#[cfg(feature = "runtime")]
pub mod runtime;

pub use manual::ManualHost;
pub use queue::TimerQueue;
#[cfg(feature = "runtime")]
pub use runtime::{CarouselRuntime, Command, RuntimeConfig, RuntimeError};
