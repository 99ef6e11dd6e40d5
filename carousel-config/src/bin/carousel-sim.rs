use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use carousel_config::{ConfigLoader, init_tracing};
use carousel_core::host::Command;
use carousel_core::{Carousel, CarouselRuntime, RuntimeConfig};
use carousel_model::CarouselItem;
use clap::Parser;
use tokio::time::{Instant, sleep_until};
use tracing::{info, warn};

/// Pause between the synthetic pointer events of a scripted swipe.
const SWIPE_STEP: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(
    name = "carousel-sim",
    about = "Run a headless carousel and log every frame it renders"
)]
struct Cli {
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Environment file with CAROUSEL_* overrides
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Number of synthetic cards
    #[arg(long, default_value_t = 5)]
    items: usize,

    /// Container width in pixels
    #[arg(long)]
    viewport: Option<f32>,

    /// How long to run, e.g. "10s" or "1m 30s"
    #[arg(long, default_value = "10s", value_parser = humantime::parse_duration)]
    duration: Duration,

    /// Signed pointer travel of a scripted swipe; negative moves forward
    #[arg(long, allow_hyphen_values = true)]
    swipe: Option<f32>,

    /// When the scripted swipe starts
    #[arg(long, default_value = "1s", value_parser = humantime::parse_duration)]
    swipe_at: Duration,

    /// When the pointer starts hovering over the carousel
    #[arg(long, value_parser = humantime::parse_duration)]
    hover_at: Option<Duration>,

    /// How long the hover lasts
    #[arg(long, default_value = "2s", value_parser = humantime::parse_duration)]
    hover_for: Duration,

    /// Print the resolved settings as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info").context("failed to initialise logging")?;

    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &cli.env_file {
        loader = loader.with_env_file(path);
    }
    let load = loader.load().context("failed to load carousel settings")?;
    for warning in load.warnings.iter() {
        match &warning.hint {
            Some(hint) => warn!(hint = %hint, "{}", warning.message),
            None => warn!("{}", warning.message),
        }
    }

    let mut settings = load.settings;
    if let Some(width) = cli.viewport {
        settings.viewport_width = width;
    }

    if cli.print_config {
        println!("{}", toml::to_string_pretty(&settings)?);
        return Ok(());
    }

    let items = (0..cli.items)
        .map(|i| {
            CarouselItem::new(
                format!("Card {}", i + 1),
                format!("images/card-{i}.jpg"),
                format!("/cards/{i}"),
            )
        })
        .collect();
    let carousel = Carousel::try_new(items, settings)?;
    let runtime = CarouselRuntime::spawn(carousel, RuntimeConfig::default());

    let mut frames = runtime.frames();
    let logger = tokio::spawn(async move {
        while frames.changed().await.is_ok() {
            let frame = frames.borrow_and_update().clone();
            info!(
                index = frame.current_logical_index,
                offset = frame.transform_offset_px,
                animated = frame.transition_enabled,
                auto_playing = frame.is_auto_playing,
                dragging = frame.is_dragging,
                "frame"
            );
        }
    });

    let started = Instant::now();
    for (at, command) in script(&cli) {
        sleep_until(started + at).await;
        runtime.send(command).await?;
    }
    sleep_until(started + cli.duration).await;

    let carousel = runtime.shutdown().await?;
    logger.await?;
    info!(
        index = carousel.state().current_index,
        "simulation finished"
    );
    Ok(())
}

/// Timed inputs for the run, in firing order.
fn script(cli: &Cli) -> Vec<(Duration, Command)> {
    let mut steps = Vec::new();

    if let Some(travel) = cli.swipe {
        let start = 400.0;
        let at = cli.swipe_at;
        steps.push((at, Command::PointerDown(start)));
        steps.push((at + SWIPE_STEP, Command::PointerMove(start + travel / 2.0)));
        steps.push((at + SWIPE_STEP * 2, Command::PointerMove(start + travel)));
        steps.push((at + SWIPE_STEP * 3, Command::PointerUp));
    }

    if let Some(at) = cli.hover_at {
        steps.push((at, Command::HoverEnter));
        steps.push((at + cli.hover_for, Command::HoverLeave));
    }

    steps.retain(|(at, _)| *at < cli.duration);
    steps.sort_by_key(|(at, _)| *at);
    steps
}
