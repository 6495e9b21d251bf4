//! The frame pipeline and level progression.
//!
//! [`Game`] owns the scene and drives it one frame at a time: item updates,
//! belt movement, beam and sensor detection feeding the gate graph, Sparty
//! kicking products, product resets and finally the end-of-level countdown.
//! Propagation failures inside a frame are logged and the frame carries on;
//! the first one is handed back to the caller.

mod interaction;
mod viewport;

use bevy::prelude::Resource;
use log::{info, warn};
use thiserror::Error;

pub use interaction::Grab;
pub use viewport::Viewport;

use crate::constants::{BANNER_DURATION, LEVEL_LOAD_DELAY};
use crate::items::{Banner, Item, ItemId, Scoreboard};
use crate::level::{spawn_level, LevelError, LevelSource};
use crate::logic::{GateId, GateKind, GraphError, PropagationError, Signal};
use crate::scene::Scene;
use crate::settings::GameSettings;
use crate::visitor::{
    BeamDetectionVisitor, ConveyorProductMoveVisitor, ItemVisitor, ProductResetVisitor,
    ScoreUpdateVisitor, ScoreboardVisitor, SensorDetectionVisitor, SpartyProductVisitor,
    StopConveyorVisitor,
};

/// Failures surfaced by [`Game`] operations.
#[derive(Debug, Error)]
pub enum GameError {
    /// A signal write could not be propagated.
    #[error(transparent)]
    Propagation(#[from] PropagationError),
    /// A gate or pin handle did not resolve.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// A level could not be loaded; the previous scene is kept.
    #[error("level {number}: {source}")]
    Level {
        /// Level that failed.
        number: u32,
        /// Underlying failure.
        #[source]
        source: LevelError,
    },
}

/// Where the current level stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelPhase {
    /// Products are still being sorted.
    Playing,
    /// The level is over and the next one loads when `remaining` runs out.
    Complete {
        /// Seconds until the next level loads.
        remaining: f64,
    },
}

/// A running game.
#[derive(Resource)]
pub struct Game {
    settings: GameSettings,
    scene: Scene,
    source: Box<dyn LevelSource>,
    level: u32,
    game_score: i32,
    phase: LevelPhase,
    beam_product: Option<ItemId>,
    grab: Option<Grab>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("level", &self.level)
            .field("game_score", &self.game_score)
            .field("phase", &self.phase)
            .field("items", &self.scene.len())
            .finish_non_exhaustive()
    }
}

fn keep_first(first: &mut Option<GameError>, outcome: Result<(), PropagationError>) {
    if let Err(err) = outcome {
        warn!("propagation failed: {err}");
        if first.is_none() {
            *first = Some(err.into());
        }
    }
}

impl Game {
    /// Creates a game with an empty scene. Call [`Game::start`] to load the
    /// first level.
    #[must_use]
    pub fn new(settings: GameSettings, source: Box<dyn LevelSource>) -> Self {
        Self {
            scene: Scene::new(settings.graph),
            level: settings.first_level,
            settings,
            source,
            game_score: 0,
            phase: LevelPhase::Playing,
            beam_product: None,
            grab: None,
        }
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// The current scene.
    #[must_use]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the current scene.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Number of the loaded level.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Points banked from completed levels.
    #[must_use]
    pub const fn game_score(&self) -> i32 {
        self.game_score
    }

    /// Progress of the current level.
    #[must_use]
    pub const fn phase(&self) -> LevelPhase {
        self.phase
    }

    /// Runs `visitor` over the scene in z-order.
    pub fn accept(&mut self, visitor: &mut dyn ItemVisitor) {
        self.scene.accept(visitor);
    }

    /// Places a player gate on top of the scene.
    pub fn add_gate(&mut self, kind: GateKind, position: glam::DVec2) -> (ItemId, GateId) {
        self.scene.add_gate(kind, position)
    }

    /// Loads the first configured level.
    ///
    /// # Errors
    /// See [`Game::load_level`].
    pub fn start(&mut self) -> Result<(), GameError> {
        self.load_level(self.settings.first_level)
    }

    /// Replaces the scene with level `number`.
    ///
    /// The new scene is built aside and swapped in only once it is complete,
    /// so on failure the previous level stays playable.
    ///
    /// # Errors
    /// Returns [`GameError::Level`] when the level cannot be read or built.
    pub fn load_level(&mut self, number: u32) -> Result<(), GameError> {
        let wrap = |source| GameError::Level { number, source };
        let description = self.source.load(number).map_err(wrap)?;
        let mut scene = Scene::new(self.settings.graph);
        spawn_level(&mut scene, &description).map_err(wrap)?;
        let score = self.game_score;
        scene.accept(&mut ScoreboardVisitor::new(|board: &mut Scoreboard| {
            board.set_game_score(score);
        }));
        scene.add(Item::Banner(Banner::new(
            format!("Level {number} Begin"),
            BANNER_DURATION,
        )));
        self.scene = scene;
        self.level = number;
        self.phase = LevelPhase::Playing;
        self.beam_product = None;
        self.grab = None;
        info!("level {number} started with game score {score}");
        Ok(())
    }

    /// Loads the level after the current one, repeating the last level once
    /// the end is reached.
    ///
    /// # Errors
    /// See [`Game::load_level`].
    pub fn load_next_level(&mut self) -> Result<(), GameError> {
        let next = self.level.saturating_add(1).min(self.settings.last_level);
        self.load_level(next)
    }

    /// Banks the level score, stops every belt and schedules the next level.
    /// Does nothing if the level is already complete.
    pub fn complete_level(&mut self) {
        if self.phase != LevelPhase::Playing {
            return;
        }
        let mut level_score = 0;
        self.scene
            .accept(&mut ScoreboardVisitor::new(|board: &mut Scoreboard| {
                level_score = board.level_score();
                board.add_level_score_to_game_score();
            }));
        self.game_score += level_score;
        self.scene.accept(&mut StopConveyorVisitor);
        self.scene.add(Item::Banner(Banner::new(
            "Level Complete!".to_owned(),
            LEVEL_LOAD_DELAY,
        )));
        self.phase = LevelPhase::Complete {
            remaining: LEVEL_LOAD_DELAY,
        };
        info!(
            "level {} complete: scored {level_score}, game score {}",
            self.level, self.game_score
        );
    }

    /// Advances the game by `delta` seconds, clamped to the frame period.
    ///
    /// # Errors
    /// Returns the first propagation or level-load failure of the frame.
    /// The rest of the frame still runs.
    pub fn update(&mut self, delta: f64) -> Result<(), GameError> {
        let elapsed = self.settings.clamp_elapsed(delta);
        let mut first = None;

        self.scene.update_items(elapsed);

        let mut mover = ConveyorProductMoveVisitor::new(elapsed);
        self.scene.accept(&mut mover);
        self.scene.bring_all_to_front(mover.moved());
        if mover.level_complete() {
            self.complete_level();
        }

        self.detect_beams(&mut first);
        self.detect_sensors(&mut first);
        self.scene.accept(&mut SpartyProductVisitor::new());

        let mut reset = ProductResetVisitor::new();
        self.scene.accept(&mut reset);
        if self.beam_product.is_some_and(|id| reset.was_reset(id)) {
            self.beam_product = None;
        }

        if let Err(err) = self.count_down(elapsed) {
            warn!("{err}");
            if first.is_none() {
                first = Some(err);
            }
        }
        first.map_or(Ok(()), Err)
    }

    fn detect_beams(&mut self, first: &mut Option<GameError>) {
        let mut visitor = BeamDetectionVisitor::new();
        self.scene.accept(&mut visitor);
        let detection = visitor.finish();

        let previous = self.beam_product;
        self.beam_product = detection.hit;
        if let Some(left) = previous.filter(|id| detection.hit != Some(*id)) {
            self.leave_beam(left);
        }

        for reading in &detection.readings {
            if let Some(Item::Beam(beam)) = self.scene.get_mut(reading.beam) {
                beam.set_detected(reading.detected);
            }
            keep_first(first, self.write_bridge(reading.gate, reading.signal()));
        }
    }

    fn leave_beam(&mut self, id: ItemId) {
        let Some(Item::Product(product)) = self.scene.get_mut(id) else {
            return;
        };
        let outcome = product.leave_beam();
        log::debug!("product {id:?} left the beam: {outcome:?}");
        self.scene.accept(&mut ScoreUpdateVisitor::new(outcome));
    }

    fn detect_sensors(&mut self, first: &mut Option<GameError>) {
        let mut visitor = SensorDetectionVisitor::new();
        self.scene.accept(&mut visitor);
        for reading in visitor.finish() {
            for (gate, signal) in reading.writes {
                keep_first(first, self.write_bridge(gate, signal));
            }
        }
    }

    fn write_bridge(&mut self, gate: GateId, signal: Signal) -> Result<(), PropagationError> {
        let graph = self.scene.graph_mut();
        let pin = graph.output_pin(gate, 0)?;
        graph.set_output(pin, signal)
    }

    fn count_down(&mut self, elapsed: f64) -> Result<(), GameError> {
        let LevelPhase::Complete { remaining } = self.phase else {
            return Ok(());
        };
        let left = remaining - elapsed;
        if left > 0.0 {
            self.phase = LevelPhase::Complete { remaining: left };
            return Ok(());
        }
        self.phase = LevelPhase::Playing;
        self.load_next_level()
    }
}
