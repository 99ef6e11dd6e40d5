//! Caller-facing carousel configuration.

use std::time::Duration;

/// Default values for every recognised option.
pub mod defaults {
    pub const AUTO_SLIDE_INTERVAL_MS: u64 = 3_000;
    pub const CARD_HEIGHT: f32 = 300.0;
    /// Used when the size fraction cannot be parsed.
    pub const CARD_WIDTH: f32 = 300.0;
    pub const VIEWPORT_WIDTH: f32 = 750.0;
    pub const MIN_DRAG_DISTANCE: f32 = 40.0;
    pub const SIZE: &str = "1/3";
    pub const SPACING: f32 = 0.0;
    pub const GRACE_PERIOD_MS: u64 = 100;
}

/// Horizontal placement of the active card inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Alignment {
    /// Active card flush with the left edge of the viewport.
    #[default]
    Start,
    /// Active card centred, neighbours partially visible on both sides.
    Center,
}

impl std::str::FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" | "left" => Ok(Alignment::Start),
            "center" | "centre" => Ok(Alignment::Center),
            other => Err(format!("unknown alignment '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselSettings {
    pub auto_slide_interval_ms: u64,
    /// Explicit card width. When set, the responsive layout is bypassed.
    pub card_width: Option<f32>,
    pub card_height: f32,
    /// Fallback container width for consumers that cannot report a live one.
    pub viewport_width: f32,
    pub min_drag_distance: f32,
    /// Display fraction `"a/b"`, meaning `b` cards visible at once.
    pub size: String,
    pub spacing: f32,
    /// Delay before the post-drag click suppression is lifted.
    pub grace_period_ms: u64,
    pub alignment: Alignment,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            auto_slide_interval_ms: defaults::AUTO_SLIDE_INTERVAL_MS,
            card_width: None,
            card_height: defaults::CARD_HEIGHT,
            viewport_width: defaults::VIEWPORT_WIDTH,
            min_drag_distance: defaults::MIN_DRAG_DISTANCE,
            size: defaults::SIZE.to_string(),
            spacing: defaults::SPACING,
            grace_period_ms: defaults::GRACE_PERIOD_MS,
            alignment: Alignment::Start,
        }
    }
}

impl CarouselSettings {
    pub fn auto_slide_interval(&self) -> Duration {
        Duration::from_millis(self.auto_slide_interval_ms)
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }

    pub fn with_auto_slide_interval(mut self, interval: Duration) -> Self {
        self.auto_slide_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_viewport_width(mut self, width: f32) -> Self {
        self.viewport_width = width;
        self
    }

    pub fn with_card_width(mut self, width: f32) -> Self {
        self.card_width = Some(width);
        self
    }

    pub fn with_min_drag_distance(mut self, distance: f32) -> Self {
        self.min_drag_distance = distance;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let s = CarouselSettings::default();
        assert_eq!(s.auto_slide_interval(), Duration::from_secs(3));
        assert_eq!(s.card_width, None);
        assert_eq!(s.card_height, 300.0);
        assert_eq!(s.viewport_width, 750.0);
        assert_eq!(s.min_drag_distance, 40.0);
        assert_eq!(s.size, "1/3");
        assert_eq!(s.spacing, 0.0);
        assert_eq!(s.grace_period(), Duration::from_millis(100));
    }

    #[test]
    fn alignment_parses_aliases() {
        assert_eq!("Center".parse::<Alignment>(), Ok(Alignment::Center));
        assert_eq!("left".parse::<Alignment>(), Ok(Alignment::Start));
        assert!("diagonal".parse::<Alignment>().is_err());
    }
}
