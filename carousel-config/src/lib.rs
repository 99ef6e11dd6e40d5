//! Settings loading for the carousel engine.
//!
//! [`ConfigLoader`] layers defaults, an optional `carousel.toml`, an optional
//! `.env` file and `CAROUSEL_*` environment variables into a validated
//! [`CarouselSettings`](carousel_model::CarouselSettings).

#![allow(missing_docs)]

pub mod error;
pub mod loader;
pub mod sources;
pub mod telemetry;
pub mod validation;

pub use error::{ConfigError, Result};
pub use loader::{ConfigLoad, ConfigLoader, ConfigLoaderOptions, ConfigMetadata};
pub use sources::{ENV_PREFIX, EnvConfig, FileConfig};
pub use telemetry::init_tracing;
pub use validation::{ConfigWarning, ConfigWarnings, apply_guard_rails};
