//! The carousel handle exposed to rendering layers
//!
//! [`Carousel`] wires the five components together. Each input runs the
//! matching state transition, then lets the loop indexer and the autoplay
//! scheduler react to the new snapshot, and returns every requested effect in
//! order. Hosts execute those effects and deliver due timers through
//! [`Carousel::fire`].

use carousel_model::{Alignment, CarouselItem, CarouselSettings, ItemId, MIN_ITEMS};

use crate::autoplay::AutoAdvanceScheduler;
use crate::effects::{Effects, TimerKind, TimerToken};
use crate::error::{CarouselError, Result};
use crate::gesture::{DragEnd, GestureTracker};
use crate::layout::{LayoutCalculator, LayoutConfig, LayoutInput};
use crate::looping::{self, LoopIndexer};
use crate::state::{CarouselState, StateStore, Transition};

/// Why a handle is inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InactiveReason {
    InsufficientItems { count: usize },
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Active,
    Inactive(InactiveReason),
}

/// Keyboard navigation keys understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    Home,
    End,
}

/// What happened to a delivered timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FireOutcome {
    Applied(Effects),
    /// Superseded, cancelled, or delivered after disposal. Nothing changed.
    Stale,
}

/// A click on a card that survived drag suppression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemActivation {
    pub logical_index: usize,
    pub id: ItemId,
    pub link_ref: String,
}

/// Everything the renderer needs to position one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub transform_offset_px: f32,
    pub transition_enabled: bool,
    pub card_width_px: f32,
    pub card_height_px: f32,
    pub spacing_px: f32,
    pub visible_count: f32,
    pub current_logical_index: usize,
    /// Real-collection index for every physical slot, wrap pads included.
    pub padded_sequence_indices: Vec<usize>,
    pub alignment: Alignment,
    pub is_auto_playing: bool,
    pub is_dragging: bool,
    pub has_dragged: bool,
}

impl RenderFrame {
    fn inert(layout: &LayoutConfig, alignment: Alignment) -> Self {
        Self {
            transform_offset_px: 0.0,
            transition_enabled: true,
            card_width_px: layout.card_width,
            card_height_px: layout.card_height,
            spacing_px: layout.spacing,
            visible_count: 0.0,
            current_logical_index: 0,
            padded_sequence_indices: Vec::new(),
            alignment,
            is_auto_playing: false,
            is_dragging: false,
            has_dragged: false,
        }
    }

    /// Number of cards the renderer should draw.
    pub fn card_count(&self) -> usize {
        self.padded_sequence_indices.len()
    }
}

#[derive(Debug)]
pub struct Carousel {
    items: Vec<CarouselItem>,
    settings: CarouselSettings,
    activation: Activation,
    store: StateStore,
    tracker: GestureTracker,
    indexer: LoopIndexer,
    scheduler: AutoAdvanceScheduler,
    layout: LayoutCalculator,
    mounted: bool,
}

impl Carousel {
    /// Create a handle. Fewer than three items yield an inert handle whose
    /// frames contain no cards and whose inputs do nothing.
    pub fn new(items: Vec<CarouselItem>, settings: CarouselSettings) -> Self {
        let activation = if items.len() < MIN_ITEMS {
            tracing::warn!(
                count = items.len(),
                required = MIN_ITEMS,
                "carousel inactive: not enough items"
            );
            Activation::Inactive(InactiveReason::InsufficientItems { count: items.len() })
        } else {
            Activation::Active
        };

        let len = items.len();
        let store = StateStore::new(len)
            .with_min_drag_distance(settings.min_drag_distance)
            .with_grace_period(settings.grace_period());
        let layout = LayoutCalculator::new(layout_input(&settings, settings.viewport_width));

        Self {
            indexer: LoopIndexer::new(len),
            scheduler: AutoAdvanceScheduler::new(settings.auto_slide_interval()),
            tracker: GestureTracker::new(),
            items,
            settings,
            activation,
            store,
            layout,
            mounted: false,
        }
    }

    /// Like [`Carousel::new`], but reports an undersized collection as an error.
    pub fn try_new(items: Vec<CarouselItem>, settings: CarouselSettings) -> Result<Self> {
        if items.len() < MIN_ITEMS {
            return Err(CarouselError::InsufficientItems {
                count: items.len(),
                required: MIN_ITEMS,
            });
        }
        Ok(Self::new(items, settings))
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn is_active(&self) -> bool {
        self.activation == Activation::Active
    }

    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    pub fn settings(&self) -> &CarouselSettings {
        &self.settings
    }

    pub fn state(&self) -> &CarouselState {
        self.store.state()
    }

    pub fn layout(&self) -> &LayoutConfig {
        self.layout.current()
    }

    /// Start the engine's timers. Hosts call this once after creation; later
    /// calls return no effects.
    pub fn mount(&mut self) -> Effects {
        if !self.is_active() || self.mounted {
            return Effects::new();
        }
        self.mounted = true;
        self.scheduler.reconcile(self.store.state())
    }

    /// Run a transition and let the indexer and scheduler react to it.
    fn apply<F>(&mut self, op: F) -> Effects
    where
        F: FnOnce(&mut StateStore, &mut GestureTracker) -> Option<Transition>,
    {
        if !self.is_active() {
            return Effects::new();
        }
        let previous = self.store.state().current_index;
        let Some(transition) = op(&mut self.store, &mut self.tracker) else {
            return Effects::new();
        };

        let mut effects = transition.effects;
        effects.append(self.indexer.observe(previous, &transition.state));
        if self.mounted {
            effects.append(self.scheduler.reconcile(&transition.state));
        }
        effects
    }

    pub fn on_pointer_down(&mut self, x: f32) -> Effects {
        self.apply(|store, tracker| tracker.start(store, x))
    }

    pub fn on_pointer_move(&mut self, x: f32) -> Effects {
        self.apply(|store, tracker| tracker.moved(store, x))
    }

    pub fn on_pointer_up(&mut self) -> Effects {
        self.apply(|store, tracker| tracker.end(store, DragEnd::Release))
    }

    pub fn on_pointer_cancel(&mut self) -> Effects {
        self.apply(|store, tracker| tracker.end(store, DragEnd::Cancel))
    }

    pub fn on_pointer_leave_while_active(&mut self) -> Effects {
        self.apply(|store, tracker| tracker.end(store, DragEnd::Leave))
    }

    pub fn on_touch_start(&mut self, touches: &[f32]) -> Effects {
        self.apply(|store, tracker| tracker.touch_start(store, touches))
    }

    pub fn on_touch_move(&mut self, touches: &[f32]) -> Effects {
        self.apply(|store, tracker| tracker.touch_move(store, touches))
    }

    pub fn on_touch_end(&mut self) -> Effects {
        self.on_pointer_up()
    }

    pub fn on_hover_enter(&mut self) -> Effects {
        self.apply(|store, _| Some(store.set_hovered(true)))
    }

    pub fn on_hover_leave(&mut self) -> Effects {
        self.apply(|store, _| Some(store.set_hovered(false)))
    }

    pub fn go_to(&mut self, index: isize) -> Effects {
        self.apply(|store, _| Some(store.go_to_slide(index)))
    }

    pub fn next(&mut self) -> Effects {
        self.apply(|store, _| Some(store.next()))
    }

    pub fn prev(&mut self) -> Effects {
        self.apply(|store, _| Some(store.prev()))
    }

    pub fn set_auto_play(&mut self, enable: bool) -> Effects {
        self.apply(|store, _| Some(store.set_auto_play(enable)))
    }

    pub fn on_key(&mut self, key: NavKey) -> Effects {
        match key {
            NavKey::ArrowLeft => self.prev(),
            NavKey::ArrowRight => self.next(),
            NavKey::Home => self.go_to(0),
            NavKey::End => self.go_to(-1),
        }
    }

    /// Report a live container width. Returns true when the geometry changed.
    pub fn set_viewport_width(&mut self, width: f32) -> bool {
        let Some(next) = self.layout.update(layout_input(&self.settings, width)) else {
            return false;
        };
        tracing::debug!(
            viewport = width,
            card_width = next.card_width,
            visible = next.visible_count,
            "layout changed"
        );
        true
    }

    /// Apply new settings. Interval changes restart a running autoplay timer;
    /// geometry is recomputed against the current viewport width.
    pub fn reconfigure(&mut self, settings: CarouselSettings) -> Effects {
        let viewport = self.layout().viewport_width;
        self.store.set_min_drag_distance(settings.min_drag_distance);
        self.store.set_grace_period(settings.grace_period());
        self.settings = settings;
        self.set_viewport_width(viewport);

        if !self.is_active() || !self.mounted {
            return Effects::new();
        }
        let period = self.settings.auto_slide_interval();
        self.scheduler.set_period(period, self.store.state())
    }

    /// Resolve a click on a physical slot. Suppressed while a drag is in
    /// progress or during the grace period after one.
    pub fn activate(&self, slot: usize) -> Option<ItemActivation> {
        if !self.is_active() {
            return None;
        }
        let state = self.store.state();
        if state.is_dragging || state.has_dragged {
            tracing::trace!(slot, "click suppressed after drag");
            return None;
        }
        let logical = self
            .indexer
            .logical_for_slot(slot, self.layout().visible_count)?;
        let item = self.items.get(logical)?;
        Some(ItemActivation {
            logical_index: logical,
            id: item.id,
            link_ref: item.link_ref.clone(),
        })
    }

    /// Deliver a due timer.
    pub fn fire(&mut self, token: TimerToken) -> FireOutcome {
        if !self.is_active() {
            tracing::trace!(?token, "timer fired on inactive carousel");
            return FireOutcome::Stale;
        }
        let outcome = match token.kind {
            TimerKind::AutoAdvance => {
                if !self.scheduler.accept_tick(token) {
                    FireOutcome::Stale
                } else {
                    FireOutcome::Applied(self.next())
                }
            }
            TimerKind::DragReset => {
                if self.store.clear_has_dragged(token) {
                    FireOutcome::Applied(Effects::new())
                } else {
                    FireOutcome::Stale
                }
            }
            TimerKind::TransitionRestore => {
                if self.indexer.restore(token) {
                    FireOutcome::Applied(Effects::new())
                } else {
                    FireOutcome::Stale
                }
            }
        };
        if outcome == FireOutcome::Stale {
            tracing::trace!(?token, "ignored stale timer");
        }
        outcome
    }

    /// Tear down: cancel every live timer and make the handle inert. Safe to
    /// call more than once.
    pub fn dispose(&mut self) -> Effects {
        if self.activation == Activation::Inactive(InactiveReason::Disposed) {
            return Effects::new();
        }
        let mut effects = self.scheduler.teardown();
        effects.append(self.store.teardown());
        effects.append(self.indexer.teardown());
        self.activation = Activation::Inactive(InactiveReason::Disposed);
        tracing::debug!(cancelled = effects.len(), "carousel disposed");
        effects
    }

    pub fn render_frame(&self) -> RenderFrame {
        if !self.is_active() {
            return RenderFrame::inert(self.layout(), self.settings.alignment);
        }
        let state = self.store.state();
        let layout = self.layout();
        let slot = looping::physical_slot(state.current_index);

        let mut offset = -(slot as f32 * layout.stride());
        if self.settings.alignment == Alignment::Center {
            offset += (layout.viewport_width - layout.card_width) / 2.0;
        }
        offset += state.drag_offset;

        RenderFrame {
            transform_offset_px: offset,
            // Animating a finger-follow would lag the pointer.
            transition_enabled: self.indexer.transition_enabled() && !state.is_dragging,
            card_width_px: layout.card_width,
            card_height_px: layout.card_height,
            spacing_px: layout.spacing,
            visible_count: layout.visible_count,
            current_logical_index: state.current_index,
            padded_sequence_indices: self.indexer.padded_indices(layout.visible_count),
            alignment: self.settings.alignment,
            is_auto_playing: state.is_auto_playing,
            is_dragging: state.is_dragging,
            has_dragged: state.has_dragged,
        }
    }
}

fn layout_input(settings: &CarouselSettings, viewport_width: f32) -> LayoutInput<'_> {
    LayoutInput {
        size: &settings.size,
        spacing: settings.spacing,
        viewport_width,
        card_width: settings.card_width,
        card_height: settings.card_height,
    }
}
