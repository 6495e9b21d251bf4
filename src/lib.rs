#![cfg_attr(docsrs, feature(doc_cfg))]
//! Core of Sparty, a conveyor-belt logic puzzle.
//!
//! Products ride a conveyor past beams and sensors. Those detectors drive a
//! tri-state gate network the player wires up, and the network's output
//! makes Sparty kick products off the belt. The crate provides the gate
//! simulation, the visitor protocol over scene items, level loading and the
//! frame pipeline, plus a Bevy plugin and a headless runner.
pub mod constants;
pub mod game;
pub mod geometry;
pub mod items;
pub mod level;
pub mod logging;
pub mod logic;
pub mod plugin;
pub mod scene;
pub mod settings;
pub mod visitor;

pub use game::{Game, GameError, LevelPhase, Viewport};
pub use level::{FileLevelCatalog, LevelError, LevelSource};
pub use logging::init as init_logging;
pub use logic::{GateGraph, GateId, GateKind, GraphError, PinId, PropagationError, Signal};
pub use plugin::{GameSyncError, SpartyPlugin};
pub use scene::Scene;
pub use settings::GameSettings;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use sparty::prelude::*;
    //! ```

    pub use crate::game::{Game, GameError};
    pub use crate::items::{Item, ItemId, Property};
    pub use crate::logic::{GateGraph, GateKind, Signal};
    pub use crate::scene::Scene;
    pub use crate::settings::GameSettings;
    pub use crate::visitor::ItemVisitor;
    pub use glam::DVec2;
}
