//! Core data model definitions shared across the carousel crates.
#![allow(missing_docs)]

pub mod ids;
pub mod item;
pub mod settings;

pub use ids::ItemId;
pub use item::CarouselItem;
pub use settings::{Alignment, CarouselSettings, defaults};

/// Smallest item collection the engine will activate for.
pub const MIN_ITEMS: usize = 3;
