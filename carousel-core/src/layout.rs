//! Responsive card geometry
//!
//! Turns a display fraction, spacing and viewport width into a concrete card
//! width and visible-card count. Everything here is a pure function of its
//! inputs; [`LayoutCalculator`] only holds the current result so callers can
//! skip no-op updates.

use std::str::FromStr;

use carousel_model::defaults;

use crate::error::CarouselError;

/// Upper bound on the visible-card count, whatever the fraction or viewport.
pub const MAX_VISIBLE_COUNT: f32 = 64.0;

/// Parsed `"a/b"` display fraction; `b` is the number of cards visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeFraction {
    pub numerator: f32,
    pub denominator: f32,
}

impl SizeFraction {
    pub fn visible_count(&self) -> f32 {
        self.denominator
    }
}

impl FromStr for SizeFraction {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CarouselError::InvalidSizeFraction(s.to_string());
        let (a, b) = s.split_once('/').ok_or_else(invalid)?;
        let numerator: f32 = a.trim().parse().map_err(|_| invalid())?;
        let denominator: f32 = b.trim().parse().map_err(|_| invalid())?;
        if !numerator.is_finite() || !(denominator > 0.0 && denominator <= MAX_VISIBLE_COUNT) {
            return Err(invalid());
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }
}

/// Viewport width classes used by the responsive override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// Below 640px: one card.
    Compact,
    /// 640px up to 768px: one card plus half of the next.
    Narrow,
    /// 768px up to 1024px: two cards.
    Medium,
    /// 1024px and wider: the configured fraction.
    Wide,
}

impl Breakpoint {
    pub const NARROW_MIN: f32 = 640.0;
    pub const MEDIUM_MIN: f32 = 768.0;
    pub const WIDE_MIN: f32 = 1024.0;

    pub fn for_width(viewport_width: f32) -> Self {
        if viewport_width < Self::NARROW_MIN {
            Breakpoint::Compact
        } else if viewport_width < Self::MEDIUM_MIN {
            Breakpoint::Narrow
        } else if viewport_width < Self::WIDE_MIN {
            Breakpoint::Medium
        } else {
            Breakpoint::Wide
        }
    }

    /// Visible count forced by this breakpoint, if any.
    pub fn forced_visible_count(self) -> Option<f32> {
        match self {
            Breakpoint::Compact => Some(1.0),
            Breakpoint::Narrow => Some(1.5),
            Breakpoint::Medium => Some(2.0),
            Breakpoint::Wide => None,
        }
    }
}

/// Effective visible count for a viewport and configured fraction.
///
/// Returns `None` when the breakpoint defers to the configured fraction and
/// that fraction does not parse.
pub fn effective_visible_count(viewport_width: f32, size: &str) -> Option<f32> {
    Breakpoint::for_width(viewport_width)
        .forced_visible_count()
        .or_else(|| size.parse::<SizeFraction>().ok().map(|f| f.visible_count()))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput<'a> {
    pub size: &'a str,
    pub spacing: f32,
    pub viewport_width: f32,
    /// Explicit width; skips the fraction and the responsive override.
    pub card_width: Option<f32>,
    pub card_height: f32,
}

/// Concrete card geometry for one set of inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub card_width: f32,
    pub card_height: f32,
    pub spacing: f32,
    pub viewport_width: f32,
    pub visible_count: f32,
}

impl LayoutConfig {
    /// Distance between the left edges of two neighbouring cards.
    pub fn stride(&self) -> f32 {
        self.card_width + self.spacing
    }
}

pub fn compute(input: LayoutInput<'_>) -> LayoutConfig {
    let spacing = non_negative(input.spacing);
    let viewport_width = non_negative(input.viewport_width);

    let fixed = |card_width: f32| LayoutConfig {
        card_width,
        card_height: input.card_height,
        spacing,
        viewport_width,
        visible_count: fitted_count(viewport_width, card_width, spacing),
    };

    if let Some(card_width) = input.card_width {
        return fixed(non_negative(card_width));
    }

    match effective_visible_count(viewport_width, input.size) {
        Some(visible) => {
            let card_width = ((viewport_width - spacing * (visible - 1.0)) / visible).max(0.0);
            LayoutConfig {
                card_width,
                card_height: input.card_height,
                spacing,
                viewport_width,
                visible_count: visible.min(MAX_VISIBLE_COUNT),
            }
        }
        None => {
            tracing::warn!(
                size = input.size,
                "unparsable size fraction, falling back to default card width"
            );
            fixed(defaults::CARD_WIDTH)
        }
    }
}

/// Fully visible cards of a fixed width: `floor((viewport + s) / (w + s))`,
/// between one and [`MAX_VISIBLE_COUNT`].
fn fitted_count(viewport_width: f32, card_width: f32, spacing: f32) -> f32 {
    let stride = (card_width + spacing).max(1.0);
    ((viewport_width + spacing) / stride)
        .floor()
        .clamp(1.0, MAX_VISIBLE_COUNT)
}

/// Non-finite measurements count as zero.
fn non_negative(px: f32) -> f32 {
    if px.is_finite() { px.max(0.0) } else { 0.0 }
}

/// Holds the current layout so unchanged inputs are cheap to detect.
#[derive(Debug, Clone)]
pub struct LayoutCalculator {
    current: LayoutConfig,
}

impl LayoutCalculator {
    pub fn new(input: LayoutInput<'_>) -> Self {
        Self {
            current: compute(input),
        }
    }

    pub fn current(&self) -> &LayoutConfig {
        &self.current
    }

    /// Recompute and return the layout only when it differs from the current one.
    pub fn update(&mut self, input: LayoutInput<'_>) -> Option<LayoutConfig> {
        let next = compute(input);
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(size: &str, spacing: f32, viewport_width: f32) -> LayoutInput<'_> {
        LayoutInput {
            size,
            spacing,
            viewport_width,
            card_width: None,
            card_height: 300.0,
        }
    }

    #[test]
    fn parses_fraction() {
        let f: SizeFraction = "1/3".parse().unwrap();
        assert_eq!(f.visible_count(), 3.0);
        let f: SizeFraction = " 2 / 5 ".parse().unwrap();
        assert_eq!(f.numerator, 2.0);
        assert_eq!(f.denominator, 5.0);
    }

    #[test]
    fn rejects_bad_fractions() {
        for bad in ["", "3", "1/0", "a/b", "1/-2", "1/inf", "1/NaN", "1/65", "1/1e30"] {
            assert!(bad.parse::<SizeFraction>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn breakpoint_boundaries() {
        assert_eq!(Breakpoint::for_width(639.9), Breakpoint::Compact);
        assert_eq!(Breakpoint::for_width(640.0), Breakpoint::Narrow);
        assert_eq!(Breakpoint::for_width(767.0), Breakpoint::Narrow);
        assert_eq!(Breakpoint::for_width(768.0), Breakpoint::Medium);
        assert_eq!(Breakpoint::for_width(1023.0), Breakpoint::Medium);
        assert_eq!(Breakpoint::for_width(1024.0), Breakpoint::Wide);
    }

    #[test]
    fn wide_viewport_uses_configured_fraction() {
        let layout = compute(input("1/3", 15.0, 1230.0));
        assert_eq!(layout.visible_count, 3.0);
        assert_eq!(layout.card_width, 400.0);
    }

    #[test]
    fn narrow_viewports_are_overridden() {
        let compact = compute(input("1/3", 0.0, 500.0));
        assert_eq!(compact.visible_count, 1.0);
        assert_eq!(compact.card_width, 500.0);

        let narrow = compute(input("1/3", 10.0, 700.0));
        assert_eq!(narrow.visible_count, 1.5);
        assert_eq!(narrow.card_width, (700.0 - 5.0) / 1.5);

        let medium = compute(input("1/3", 20.0, 800.0));
        assert_eq!(medium.visible_count, 2.0);
        assert_eq!(medium.card_width, 390.0);
    }

    #[test]
    fn explicit_card_width_short_circuits() {
        let layout = compute(LayoutInput {
            card_width: Some(250.0),
            ..input("1/3", 10.0, 500.0)
        });
        assert_eq!(layout.card_width, 250.0);
        // floor((500 + 10) / 260) = 1
        assert_eq!(layout.visible_count, 1.0);
    }

    #[test]
    fn invalid_fraction_falls_back_on_wide_viewport() {
        let layout = compute(input("thirds", 0.0, 1200.0));
        assert_eq!(layout.card_width, 300.0);
        assert_eq!(layout.visible_count, 4.0);
    }

    #[test]
    fn invalid_fraction_is_irrelevant_below_wide() {
        let layout = compute(input("1/0", 0.0, 600.0));
        assert_eq!(layout.card_width, 600.0);
    }

    #[test]
    fn oversized_fraction_falls_back_to_default_width() {
        let layout = compute(input("1/1e30", 0.0, 1200.0));
        assert_eq!(layout.card_width, 300.0);
        assert_eq!(layout.visible_count, 4.0);

        let widest = compute(input("1/64", 0.0, 6400.0));
        assert_eq!(widest.visible_count, MAX_VISIBLE_COUNT);
        assert_eq!(widest.card_width, 100.0);
    }

    #[test]
    fn fitted_count_is_capped() {
        let layout = compute(LayoutInput {
            card_width: Some(1.0),
            ..input("1/3", 0.0, 1_000_000.0)
        });
        assert_eq!(layout.visible_count, MAX_VISIBLE_COUNT);
    }

    #[test]
    fn non_finite_measurements_are_treated_as_zero() {
        let layout = compute(LayoutInput {
            card_width: Some(300.0),
            ..input("1/3", 0.0, f32::INFINITY)
        });
        assert_eq!(layout.viewport_width, 0.0);
        assert_eq!(layout.visible_count, 1.0);

        let layout = compute(input("1/3", f32::NAN, f32::NAN));
        assert_eq!(layout.spacing, 0.0);
        assert_eq!(layout.visible_count, 1.0);
        assert!(layout.card_width.is_finite());
    }

    #[test]
    fn calculator_skips_unchanged_inputs() {
        let mut calc = LayoutCalculator::new(input("1/3", 0.0, 1200.0));
        assert!(calc.update(input("1/3", 0.0, 1200.0)).is_none());
        assert!(calc.update(input("1/3", 0.0, 1300.0)).is_some());
        assert_eq!(calc.current().viewport_width, 1300.0);
        assert!(calc.update(input("1/4", 0.0, 800.0)).is_some());
        // Below the wide breakpoint the configured fraction does not matter.
        assert!(calc.update(input("1/5", 0.0, 800.0)).is_none());
    }
}
