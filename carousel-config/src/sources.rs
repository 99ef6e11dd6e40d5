//! Raw configuration sources before they are merged.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use carousel_model::Alignment;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Prefix shared by every recognised environment variable.
pub const ENV_PREFIX: &str = "CAROUSEL_";

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub carousel: FileCarouselConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCarouselConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_slide_interval_ms: Option<Millis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_drag_distance: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_period_ms: Option<Millis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

/// A millisecond count, or a human-readable duration such as `"2s"` or
/// `"1s 500ms"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Millis {
    Count(u64),
    Human(String),
}

impl Millis {
    pub fn resolve(&self) -> std::result::Result<u64, humantime::DurationError> {
        match self {
            Millis::Count(ms) => Ok(*ms),
            Millis::Human(raw) => humantime::parse_duration(raw).map(duration_ms),
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub auto_slide_interval_ms: Option<u64>,
    pub card_width: Option<f32>,
    pub card_height: Option<f32>,
    pub viewport_width: Option<f32>,
    pub min_drag_distance: Option<f32>,
    pub size: Option<String>,
    pub spacing: Option<f32>,
    pub grace_period_ms: Option<u64>,
    pub alignment: Option<Alignment>,
}

impl EnvConfig {
    /// Read every `CAROUSEL_*` key from a variable map. Blank values count as
    /// unset; malformed values are rejected.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let env = EnvVars { vars };
        Ok(Self {
            config_path: env.get("CONFIG").map(|(_, raw)| PathBuf::from(raw)),
            auto_slide_interval_ms: env.millis("AUTO_SLIDE_INTERVAL_MS")?,
            card_width: env.pixels("CARD_WIDTH")?,
            card_height: env.pixels("CARD_HEIGHT")?,
            viewport_width: env.pixels("VIEWPORT_WIDTH")?,
            min_drag_distance: env.pixels("MIN_DRAG_DISTANCE")?,
            size: env.get("SIZE").map(|(_, raw)| raw.to_string()),
            spacing: env.pixels("SPACING")?,
            grace_period_ms: env.millis("GRACE_PERIOD_MS")?,
            alignment: env.alignment("ALIGNMENT")?,
        })
    }

    /// Names of the settings this environment overrides.
    pub fn overridden(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        let mut mark = |set: bool, key: &'static str| {
            if set {
                keys.push(key);
            }
        };
        mark(self.auto_slide_interval_ms.is_some(), "auto_slide_interval_ms");
        mark(self.card_width.is_some(), "card_width");
        mark(self.card_height.is_some(), "card_height");
        mark(self.viewport_width.is_some(), "viewport_width");
        mark(self.min_drag_distance.is_some(), "min_drag_distance");
        mark(self.size.is_some(), "size");
        mark(self.spacing.is_some(), "spacing");
        mark(self.grace_period_ms.is_some(), "grace_period_ms");
        mark(self.alignment.is_some(), "alignment");
        keys
    }
}

#[derive(Debug)]
struct EnvVars<'a> {
    vars: &'a HashMap<String, String>,
}

impl<'a> EnvVars<'a> {
    fn get(&self, name: &str) -> Option<(String, &'a str)> {
        let key = format!("{ENV_PREFIX}{name}");
        let raw = self.vars.get(&key)?.trim();
        if raw.is_empty() {
            None
        } else {
            Some((key, raw))
        }
    }

    fn pixels(&self, name: &str) -> Result<Option<f32>> {
        self.get(name)
            .map(|(key, raw)| {
                raw.parse::<f32>().map_err(|err| invalid(key, raw, err.to_string()))
            })
            .transpose()
    }

    fn millis(&self, name: &str) -> Result<Option<u64>> {
        self.get(name)
            .map(|(key, raw)| match raw.parse::<u64>() {
                Ok(ms) => Ok(ms),
                Err(_) => humantime::parse_duration(raw)
                    .map(duration_ms)
                    .map_err(|err| invalid(key, raw, err.to_string())),
            })
            .transpose()
    }

    fn alignment(&self, name: &str) -> Result<Option<Alignment>> {
        self.get(name)
            .map(|(key, raw)| raw.parse::<Alignment>().map_err(|err| invalid(key, raw, err)))
            .transpose()
    }
}

fn invalid(key: String, value: &str, reason: String) -> ConfigError {
    ConfigError::InvalidEnv {
        key,
        value: value.to_string(),
        reason,
    }
}
