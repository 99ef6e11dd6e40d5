//! Timer-driven behaviour on the virtual clock: autoplay, the post-drag grace
//! period, wrap frames and teardown.

use std::time::Duration;

use carousel_core::{Carousel, FireOutcome, ManualHost, TimerKind, TimerToken};
use carousel_model::{CarouselItem, CarouselSettings};

const TICK: Duration = Duration::from_millis(100);

fn items(n: usize) -> Vec<CarouselItem> {
    (0..n)
        .map(|i| {
            CarouselItem::new(
                format!("Card {i}"),
                format!("img/{i}.jpg"),
                format!("/cards/{i}"),
            )
        })
        .collect()
}

fn host(n: usize) -> ManualHost {
    let settings = CarouselSettings::default().with_auto_slide_interval(TICK);
    ManualHost::new(Carousel::new(items(n), settings))
}

fn index(host: &ManualHost) -> usize {
    host.render_frame().current_logical_index
}

#[test]
fn untouched_carousel_advances_every_tick() {
    let mut h = host(5);
    for expected in 1..=12 {
        assert_eq!(h.advance(TICK), 1);
        assert_eq!(index(&h), expected % 5);
    }
}

#[test]
fn dragging_pauses_and_release_resumes() {
    let mut h = host(5);
    h.advance(TICK);
    assert_eq!(index(&h), 1);

    h.dispatch(|c| c.on_pointer_down(0.0));
    assert_eq!(h.advance(TICK * 5), 0, "no ticks while dragging");
    assert_eq!(index(&h), 1);

    h.dispatch(|c| c.on_pointer_up());
    assert!(h.render_frame().is_auto_playing);
    h.advance(TICK);
    assert_eq!(index(&h), 2);
}

#[test]
fn hover_pauses_without_drag() {
    let mut h = host(5);
    h.dispatch(|c| c.on_hover_enter());
    h.advance(TICK * 10);
    assert_eq!(index(&h), 0);

    h.dispatch(|c| c.on_hover_leave());
    h.advance(TICK * 2);
    assert_eq!(index(&h), 2);
}

#[test]
fn release_while_hovered_stays_paused() {
    let mut h = host(5);
    h.dispatch(|c| c.on_hover_enter());
    h.dispatch(|c| c.on_pointer_down(0.0));
    h.dispatch(|c| c.on_pointer_move(-60.0));
    h.dispatch(|c| c.on_pointer_up());
    assert_eq!(index(&h), 1);
    assert!(!h.render_frame().is_auto_playing);
    h.advance(TICK * 4);
    assert_eq!(index(&h), 1);
}

#[test]
fn explicit_autoplay_toggle() {
    let mut h = host(5);
    h.dispatch(|c| c.set_auto_play(false));
    h.advance(TICK * 3);
    assert_eq!(index(&h), 0);
    h.dispatch(|c| c.set_auto_play(true));
    h.advance(TICK * 3);
    assert_eq!(index(&h), 3);
}

#[test]
fn only_one_autoplay_timer_after_many_restarts() {
    let mut h = host(5);
    for _ in 0..10 {
        h.dispatch(|c| c.on_hover_enter());
        h.dispatch(|c| c.on_hover_leave());
    }
    assert_eq!(h.pending_timers(), 1);
    assert_eq!(h.advance(TICK), 1);
}

#[test]
fn has_dragged_clears_after_grace_period() {
    let mut h = host(5);
    h.dispatch(|c| c.on_hover_enter());
    h.dispatch(|c| c.on_pointer_down(50.0));
    h.dispatch(|c| c.on_pointer_move(44.0));
    assert!(h.render_frame().has_dragged);

    h.dispatch(|c| c.on_pointer_up());
    assert!(h.render_frame().has_dragged);
    assert!(h.carousel().activate(2).is_none());

    h.advance(Duration::from_millis(99));
    assert!(h.render_frame().has_dragged);
    h.advance(Duration::from_millis(1));
    assert!(!h.render_frame().has_dragged);
    assert!(h.carousel().activate(2).is_some());
}

#[test]
fn new_drag_inside_grace_period_cancels_reset() {
    let mut h = host(5);
    h.dispatch(|c| c.on_hover_enter());
    h.dispatch(|c| c.on_pointer_down(0.0));
    h.dispatch(|c| c.on_pointer_move(20.0));
    h.dispatch(|c| c.on_pointer_up());
    h.advance(Duration::from_millis(50));

    h.dispatch(|c| c.on_pointer_down(0.0));
    assert!(!h.render_frame().has_dragged, "reset at drag start");
    h.dispatch(|c| c.on_pointer_move(30.0));
    h.advance(Duration::from_millis(200));
    assert!(h.render_frame().has_dragged, "old reset must not fire mid-drag");
    assert_eq!(h.stale_fires(), 0);
}

#[test]
fn wrap_forward_disables_transition_for_one_frame() {
    let mut h = host(5);
    h.dispatch(|c| c.go_to(3));
    assert!(h.commit_frame().transition_enabled);
    h.dispatch(|c| c.next());
    assert!(h.commit_frame().transition_enabled);

    h.dispatch(|c| c.next());
    let wrap_frame = h.commit_frame();
    assert_eq!(wrap_frame.current_logical_index, 0);
    assert!(!wrap_frame.transition_enabled);

    let after = h.commit_frame();
    assert!(after.transition_enabled);
}

#[test]
fn wrap_backward_disables_transition_for_one_frame() {
    let mut h = host(5);
    h.dispatch(|c| c.prev());
    assert!(!h.commit_frame().transition_enabled);
    assert!(h.commit_frame().transition_enabled);
}

#[test]
fn autoplay_wrap_is_suppressed_too() {
    let mut h = host(3);
    h.advance(TICK * 2);
    assert!(h.commit_frame().transition_enabled);
    h.advance(TICK);
    assert_eq!(index(&h), 0);
    assert!(!h.commit_frame().transition_enabled);
    assert!(h.commit_frame().transition_enabled);
}

#[test]
fn drag_wrap_is_suppressed_after_release() {
    let mut h = host(5);
    h.dispatch(|c| c.on_pointer_down(0.0));
    h.dispatch(|c| c.on_pointer_move(90.0));
    assert!(!h.commit_frame().transition_enabled, "finger-follow is not animated");
    h.dispatch(|c| c.on_pointer_up());
    let frame = h.commit_frame();
    assert_eq!(frame.current_logical_index, 4);
    assert!(!frame.transition_enabled);
    assert!(h.commit_frame().transition_enabled);
}

#[test]
fn dispose_cancels_all_timers() {
    let mut h = host(5);
    h.dispatch(|c| c.on_pointer_down(0.0));
    h.dispatch(|c| c.on_pointer_move(60.0));
    h.dispatch(|c| c.on_pointer_up());
    assert!(h.pending_timers() >= 2);

    h.dispose();
    assert_eq!(h.pending_timers(), 0);
    assert_eq!(h.advance(TICK * 10), 0);
    assert_eq!(h.commit_frame().card_count(), 0);
}

#[test]
fn late_callbacks_after_dispose_are_stale() {
    let mut carousel = Carousel::new(items(5), CarouselSettings::default());
    let effects = carousel.mount();
    let tick: TimerToken = effects
        .iter()
        .map(|e| e.token())
        .find(|t| t.kind == TimerKind::AutoAdvance)
        .expect("autoplay scheduled on mount");

    assert!(matches!(carousel.fire(tick), FireOutcome::Applied(_)));
    carousel.dispose();
    assert_eq!(carousel.fire(tick), FireOutcome::Stale);
    assert_eq!(carousel.state().current_index, 1);
}
