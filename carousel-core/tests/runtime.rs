//! The tokio host under paused time.

#![cfg(feature = "runtime")]

use std::time::Duration;

use anyhow::Result;
use carousel_core::host::Command;
use carousel_core::{Activation, Carousel, CarouselRuntime, InactiveReason, RuntimeConfig};
use carousel_model::{CarouselItem, CarouselSettings};
use tokio::time::sleep;

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

fn spawn(interval_ms: u64) -> CarouselRuntime {
    let settings =
        CarouselSettings::default().with_auto_slide_interval(Duration::from_millis(interval_ms));
    CarouselRuntime::spawn(Carousel::new(items(5), settings), RuntimeConfig::default())
}

#[tokio::test(start_paused = true)]
async fn autoplay_advances_on_schedule() -> Result<()> {
    let runtime = spawn(100);
    sleep(Duration::from_millis(350)).await;
    assert_eq!(runtime.frame().current_logical_index, 3);
    runtime.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn frames_are_published_on_change() -> Result<()> {
    let runtime = spawn(100);
    let mut frames = runtime.frames();
    frames.changed().await?;
    assert_eq!(frames.borrow_and_update().current_logical_index, 1);
    runtime.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn hover_pauses_autoplay() -> Result<()> {
    let runtime = spawn(100);
    runtime.send(Command::HoverEnter).await?;
    sleep(Duration::from_secs(1)).await;
    assert_eq!(runtime.frame().current_logical_index, 0);
    assert!(!runtime.frame().is_auto_playing);

    runtime.send(Command::HoverLeave).await?;
    sleep(Duration::from_millis(250)).await;
    assert_eq!(runtime.frame().current_logical_index, 2);
    runtime.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn drag_commands_commit_in_order() -> Result<()> {
    let runtime = spawn(10_000);
    runtime.send(Command::PointerDown(300.0)).await?;
    runtime.send(Command::PointerMove(240.0)).await?;
    runtime.send(Command::PointerUp).await?;
    sleep(Duration::from_millis(1)).await;

    let frame = runtime.frame();
    assert_eq!(frame.current_logical_index, 1);
    assert!(!frame.is_dragging);
    assert!(frame.has_dragged);

    // Clicks are swallowed until the grace period has passed.
    assert!(runtime.activate(2).await?.is_none());
    sleep(Duration::from_millis(150)).await;
    let activation = runtime.activate(2).await?.expect("click after grace period");
    assert_eq!(activation.logical_index, 1);
    assert_eq!(activation.link_ref, "/cards/1");
    runtime.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn wrap_frame_is_followed_by_restored_transition() -> Result<()> {
    let runtime = spawn(10_000);
    runtime.send(Command::Prev).await?;
    sleep(Duration::from_millis(1)).await;
    let wrapped = runtime.frame();
    assert_eq!(wrapped.current_logical_index, 4);
    assert!(!wrapped.transition_enabled);

    sleep(RuntimeConfig::default().frame_interval * 2).await;
    assert!(runtime.frame().transition_enabled);
    runtime.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn shutdown_disposes_the_carousel() -> Result<()> {
    let runtime = spawn(100);
    sleep(Duration::from_millis(150)).await;
    let carousel = runtime.shutdown().await?;
    assert_eq!(
        carousel.activation(),
        Activation::Inactive(InactiveReason::Disposed)
    );
    assert_eq!(carousel.state().current_index, 1);
    Ok(())
}
