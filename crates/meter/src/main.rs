mod surface;
mod trace;

use anyhow::{Context, Error};
use clap::Parser;
use rung_meter_core::haptic::RecordingHaptics;
use rung_meter_core::helpers::{load_toml, save_toml};
use rung_meter_core::logging::{init_logging, shutdown_logging};
use rung_meter_core::meter::{MeasureSpec, PointerEvent};
use rung_meter_core::settings::Settings;
use rung_meter_core::view::MeterView;
use std::path::{Path, PathBuf};
use surface::TextSurface;
use trace::{load_trace, scenario_events, Scenario};

const DEFAULT_SETTINGS_FILE: &str = "Settings.toml";

/// Replays pointer events against a rung meter and prints every frame.
#[derive(Debug, Parser)]
#[command(name = "rung-meter", version)]
struct Cli {
    /// Settings file. Defaults to ./Settings.toml when present.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the default settings to this path and exit.
    #[arg(long)]
    init_settings: Option<PathBuf>,

    /// Display size used for any axis left unconstrained.
    #[arg(long, default_value_t = 1000.0)]
    display_width: f32,
    #[arg(long, default_value_t = 2000.0)]
    display_height: f32,

    /// Exact container width.
    #[arg(long)]
    width: Option<f32>,
    /// Exact container height.
    #[arg(long)]
    height: Option<f32>,

    /// Characters used to draw the full container width.
    #[arg(long, default_value_t = 48)]
    columns: usize,

    /// TOML file with `[[event]]` entries.
    #[arg(long, conflicts_with = "scenario", required_unless_present_any = ["scenario", "init_settings"])]
    trace: Option<PathBuf>,

    #[arg(long, value_enum)]
    scenario: Option<Scenario>,
}

fn load_settings(path: Option<&Path>) -> Result<Settings, Error> {
    match path {
        Some(path) => load_toml(path),
        None if Path::new(DEFAULT_SETTINGS_FILE).exists() => load_toml(DEFAULT_SETTINGS_FILE),
        None => Ok(Settings::default()),
    }
}

fn axis_spec(size: Option<f32>) -> MeasureSpec {
    size.map_or(MeasureSpec::Unspecified, MeasureSpec::Exactly)
}

fn replay(cli: &Cli, settings: &Settings) -> Result<(), Error> {
    let haptics = RecordingHaptics::new();
    let mut meter = MeterView::new(settings.meter.clone(), Box::new(haptics.clone()))
        .context("invalid meter settings")?;

    let (width, _) = meter
        .measure(
            &(cli.display_width, cli.display_height),
            axis_spec(cli.width),
            axis_spec(cli.height),
        )
        .context("can't lay out meter")?;

    let events: Vec<Option<PointerEvent>> = match (&cli.trace, cli.scenario) {
        (Some(path), _) => load_trace(path)?,
        (None, Some(scenario)) => match meter.layout() {
            Some(layout) => scenario_events(scenario, layout),
            None => Vec::new(),
        },
        (None, None) => Vec::new(),
    };

    let mut surface = TextSurface::new(cli.columns, width);
    meter.take_dirty();
    meter.render(&mut surface);
    println!("level {}\n{}", meter.current_level(), surface.frame());

    for event in events {
        let before = meter.current_level();
        meter.handle_pointer(event);
        if meter.take_dirty() {
            meter.render(&mut surface);
            println!(
                "level {} -> {}\n{}",
                before,
                meter.current_level(),
                surface.frame()
            );
        }
    }

    println!(
        "final level {}, {} haptic pulse(s)",
        meter.current_level(),
        haptics.count()
    );
    Ok(())
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    if let Some(path) = &cli.init_settings {
        save_toml(&Settings::default(), path)?;
        println!("wrote default settings to {}", path.display());
        return Ok(());
    }

    let settings = load_settings(cli.settings.as_deref())?;
    init_logging(&settings.logging)?;

    let result = replay(&cli, &settings);
    if let Err(e) = &result {
        tracing::error!(error = ?e, "replay failed");
    }

    shutdown_logging();
    result
}
