//! Runtime configuration for the game.
//!
//! [`GameSettings`] is a Bevy resource so systems can read it, and it
//! deserialises from JSON so the binary can load overrides from a file.
//! Missing fields fall back to their defaults.

use std::path::PathBuf;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::constants::{FRAME_PERIOD, LAST_LEVEL};
use crate::logic::GraphConfig;

/// Configuration shared by the game loop, the level catalog and the plugin.
///
/// # Examples
///
/// ```
/// use sparty::settings::GameSettings;
///
/// let settings = GameSettings::from_json(r#"{ "first_level": 3 }"#).unwrap();
/// assert_eq!(settings.first_level, 3);
/// assert_eq!(settings.last_level, 8);
/// ```
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Directory holding `level<N>.xml` files.
    pub level_directory: PathBuf,
    /// Level loaded at start-up.
    pub first_level: u32,
    /// Highest level number; completing it replays it.
    pub last_level: u32,
    /// Longest elapsed time a single frame may advance the game by.
    pub frame_period: f64,
    /// Propagation limits for the gate graph.
    pub graph: GraphConfig,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            level_directory: PathBuf::from("resources/levels"),
            first_level: 1,
            last_level: LAST_LEVEL,
            frame_period: FRAME_PERIOD,
            graph: GraphConfig::default(),
        }
    }
}

impl GameSettings {
    /// Parses settings from a JSON document.
    ///
    /// # Errors
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Clamps a measured frame time into `[0, frame_period]`.
    #[must_use]
    pub fn clamp_elapsed(&self, elapsed: f64) -> f64 {
        if elapsed.is_finite() {
            elapsed.clamp(0.0, self.frame_period.max(0.0))
        } else {
            0.0
        }
    }
}
