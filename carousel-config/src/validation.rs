use carousel_core::SizeFraction;
use carousel_model::{Alignment, CarouselSettings};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(&mut self, message: S, hint: H) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigWarning> {
        self.items.iter()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

/// Reject settings the engine cannot run with and flag the ones it merely
/// degrades.
pub fn apply_guard_rails(settings: &CarouselSettings) -> Result<ConfigWarnings> {
    let mut warnings = ConfigWarnings::default();

    if settings.auto_slide_interval_ms == 0 {
        return Err(ConfigError::Invalid {
            field: "auto_slide_interval_ms",
            reason: "must be greater than zero".into(),
        });
    }

    if let Some(width) = settings.card_width {
        positive("card_width", width)?;
    }
    positive("card_height", settings.card_height)?;
    positive("viewport_width", settings.viewport_width)?;
    non_negative("spacing", settings.spacing)?;
    non_negative("min_drag_distance", settings.min_drag_distance)?;

    if let Err(err) = settings.size.parse::<SizeFraction>() {
        warnings.push_with_hint(
            format!("size {:?} is not usable: {err}", settings.size),
            "Use a fraction such as \"1/3\"; wide viewports fall back to 300px cards until then",
        );
    }

    if settings.min_drag_distance == 0.0 {
        warnings.push("min_drag_distance is 0; any non-zero drag will change slides");
    }

    if settings.grace_period_ms == 0 {
        warnings.push_with_hint(
            "grace_period_ms is 0; a click right after a drag may activate a card",
            "Keep a short grace period (the default is 100ms)",
        );
    }

    if settings.alignment == Alignment::Center
        && settings
            .card_width
            .is_some_and(|width| width > settings.viewport_width)
    {
        warnings.push("card_width exceeds viewport_width; centred cards will overflow both edges");
    }

    Ok(warnings)
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number of pixels, got {value}"),
        });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("must be zero or more pixels, got {value}"),
        });
    }
    Ok(())
}
