use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use glam::DVec2;
use log::{info, warn};
use sparty::constants::CONVEYOR_START_BUTTON;
use sparty::items::{Item, Scoreboard};
use sparty::level::{FileLevelCatalog, LevelSource, SingleLevel};
use sparty::visitor::ScoreboardVisitor;
use sparty::{init_logging, Game, GameSettings, SpartyPlugin};

/// Headless runner for Sparty levels
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level file to play; defaults to the settings' level directory
    #[arg(long)]
    level: Option<PathBuf>,
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u32,
    /// Seconds per simulated frame
    #[arg(long)]
    frame_period: Option<f64>,
    /// Wire an output pin to an input pin, as `X,Y:X,Y` in level pixels
    #[arg(long = "wire", value_parser = parse_wire)]
    wires: Vec<(DVec2, DVec2)>,
    /// Press the start button of every conveyor after wiring
    #[arg(long)]
    start: bool,
    /// Maximum gate propagation depth
    #[arg(long)]
    max_depth: Option<usize>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_point(text: &str) -> Result<DVec2, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{text}'"))?;
    let px = x.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let py = y.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(DVec2::new(px, py))
}

fn parse_wire(text: &str) -> Result<(DVec2, DVec2), String> {
    let (from, to) = text
        .split_once(':')
        .ok_or_else(|| format!("expected X,Y:X,Y, got '{text}'"))?;
    Ok((parse_point(from)?, parse_point(to)?))
}

fn load_settings(args: &Args) -> Result<GameSettings> {
    let mut settings = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading settings {}", path.display()))?;
            GameSettings::from_json(&text)
                .with_context(|| format!("parsing settings {}", path.display()))?
        }
        None => GameSettings::default(),
    };
    if let Some(period) = args.frame_period {
        if !(period.is_finite() && period > 0.0) {
            bail!("--frame-period must be a positive number of seconds");
        }
        settings.frame_period = period;
    }
    if let Some(depth) = args.max_depth {
        settings.graph.max_depth = depth;
    }
    Ok(settings)
}

fn prepare(game: &mut Game, args: &Args) {
    for (from, to) in &args.wires {
        let outcome = game
            .press(*from)
            .and_then(|_| game.release(*to));
        match outcome {
            Ok(true) => info!("wired {from} -> {to}"),
            Ok(false) => warn!("no pin pair at {from} -> {to}"),
            Err(err) => warn!("wiring {from} -> {to} failed: {err}"),
        }
    }
    if args.start {
        let (x, y, width, height) = CONVEYOR_START_BUTTON;
        let buttons: Vec<DVec2> = game
            .scene()
            .iter()
            .filter_map(|(_, item)| match item {
                Item::Conveyor(conveyor) => Some(
                    conveyor.panel_origin() + DVec2::new(x + width / 2.0, y + height / 2.0),
                ),
                _ => None,
            })
            .collect();
        for button in buttons {
            game.click(button);
        }
    }
}

fn report(game: &mut Game) {
    let mut level_score = 0;
    game.accept(&mut ScoreboardVisitor::new(|board: &mut Scoreboard| {
        level_score = board.level_score();
    }));
    info!(
        "level {} ({:?}): level score {level_score}, game score {}",
        game.level(),
        game.phase(),
        game.game_score()
    );
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let settings = load_settings(&args)?;

    let source: Arc<dyn LevelSource> = match &args.level {
        Some(path) => Arc::new(SingleLevel::new(settings.first_level, path.clone())),
        None => Arc::new(FileLevelCatalog::new(settings.level_directory.clone())),
    };
    let period = Duration::from_secs_f64(settings.frame_period);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(period))
        .add_plugins(SpartyPlugin::with_source(settings, source));
    app.update();

    if app.world().resource::<Game>().scene().is_empty() {
        bail!("no level could be loaded");
    }
    prepare(&mut app.world_mut().resource_mut::<Game>(), &args);

    for _ in 0..args.frames {
        app.update();
    }
    report(&mut app.world_mut().resource_mut::<Game>());
    Ok(())
}
