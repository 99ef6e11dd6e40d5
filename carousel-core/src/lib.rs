//! # Carousel Core
//!
//! Headless interaction engine for a horizontally scrolling, infinitely
//! looping card carousel. The engine consumes numeric inputs (pointer
//! positions, hover signals, viewport widths) and produces numeric render
//! frames; drawing the cards is left to the caller.
//!
//! ## Architecture
//!
//! - [`layout`]: pure card geometry from a display fraction and viewport width
//! - [`state`]: the canonical [`CarouselState`] and its transitions
//! - [`gesture`]: unifies mouse and touch into one drag stream
//! - [`looping`]: padded-sequence indexing and wrap suppression
//! - [`autoplay`]: the auto-advance timer slot
//! - [`engine`]: the [`Carousel`] handle tying the above together
//! - [`host`]: drivers that execute requested [`Effects`]
//!
//! ## Example
//!
//! ```
//! use carousel_core::{Carousel, ManualHost};
//! use carousel_model::{CarouselItem, CarouselSettings};
//! use std::time::Duration;
//!
//! let items = (0..5)
//!     .map(|i| CarouselItem::new(format!("Card {i}"), format!("{i}.jpg"), format!("/{i}")))
//!     .collect();
//! let settings = CarouselSettings::default().with_auto_slide_interval(Duration::from_millis(100));
//! let mut host = ManualHost::new(Carousel::new(items, settings));
//!
//! host.advance(Duration::from_millis(250));
//! assert_eq!(host.render_frame().current_logical_index, 2);
//!
//! host.dispatch(|c| c.on_pointer_down(300.0));
//! host.dispatch(|c| c.on_pointer_move(250.0));
//! host.dispatch(|c| c.on_pointer_up());
//! assert_eq!(host.render_frame().current_logical_index, 3);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod autoplay;
pub mod effects;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod host;
pub mod layout;
pub mod looping;
pub mod state;

pub use autoplay::AutoAdvanceScheduler;
pub use effects::{Effect, Effects, Schedule, TimerKind, TimerToken};
pub use engine::{
    Activation, Carousel, FireOutcome, InactiveReason, ItemActivation, NavKey, RenderFrame,
};
pub use error::{CarouselError, Result};
pub use gesture::GestureTracker;
pub use host::ManualHost;
#[cfg(feature = "runtime")]
pub use host::{CarouselRuntime, RuntimeConfig};
pub use layout::{LayoutCalculator, LayoutConfig, SizeFraction};
pub use looping::LoopIndexer;
pub use state::{CarouselState, StateStore};

pub use carousel_model as model;
