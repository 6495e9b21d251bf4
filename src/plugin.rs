//! Bevy plugin that runs a [`Game`] headlessly from the app's clock.

use std::sync::Arc;

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::error;
use thiserror::Error;

use crate::game::Game;
use crate::level::{FileLevelCatalog, LevelSource};
use crate::settings::GameSettings;

/// Where a [`GameSyncError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSyncErrorContext {
    /// Loading the first level at startup.
    Start,
    /// Advancing a frame.
    Tick,
}

/// Event raised when the game reports a failure inside a system.
#[derive(Event, Debug, Clone, Error)]
#[error("{context:?}: {detail}")]
pub struct GameSyncError {
    /// Where the failure occurred.
    pub context: GameSyncErrorContext,
    /// Description of the underlying error.
    pub detail: String,
}

impl GameSyncError {
    /// Convenience constructor used by systems to emit error events.
    pub fn new(context: GameSyncErrorContext, detail: impl Into<String>) -> Self {
        Self {
            context,
            detail: detail.into(),
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn log_game_error(event: On<GameSyncError>) {
    let GameSyncError { context, detail } = event.event();
    error!("game error during {context:?}: {detail}");
}

/// Loads the first level.
pub fn start_game_system(mut commands: Commands, mut game: ResMut<Game>) {
    if let Err(err) = game.start() {
        commands.trigger(GameSyncError::new(
            GameSyncErrorContext::Start,
            err.to_string(),
        ));
    }
}

/// Advances the game by the frame's delta time.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn tick_game_system(mut commands: Commands, time: Res<Time>, mut game: ResMut<Game>) {
    if let Err(err) = game.update(time.delta_secs_f64()) {
        commands.trigger(GameSyncError::new(
            GameSyncErrorContext::Tick,
            err.to_string(),
        ));
    }
}

/// Installs [`GameSettings`] and [`Game`] and ticks the game every
/// `Update`.
pub struct SpartyPlugin {
    settings: GameSettings,
    source: Arc<dyn LevelSource>,
}

impl SpartyPlugin {
    /// Plugin reading levels from the settings' level directory.
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        let source = Arc::new(FileLevelCatalog::new(settings.level_directory.clone()));
        Self { settings, source }
    }

    /// Plugin reading levels from `source`.
    #[must_use]
    pub fn with_source(settings: GameSettings, source: Arc<dyn LevelSource>) -> Self {
        Self { settings, source }
    }
}

impl Default for SpartyPlugin {
    fn default() -> Self {
        Self::new(GameSettings::default())
    }
}

impl Plugin for SpartyPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_game_error);
        app.insert_resource(self.settings.clone());
        app.insert_resource(Game::new(
            self.settings.clone(),
            Box::new(Arc::clone(&self.source)),
        ));
        app.add_systems(Startup, start_game_system);
        app.add_systems(Update, tick_game_system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{LevelDescription, LevelError};
    use rstest::rstest;

    struct NoLevels;

    impl LevelSource for NoLevels {
        fn load(&self, number: u32) -> Result<LevelDescription, LevelError> {
            Err(LevelError::NoSuchLevel(number))
        }
    }

    #[derive(Resource, Default)]
    struct Captured(Vec<GameSyncError>);

    #[expect(
        clippy::needless_pass_by_value,
        reason = "Observer systems must take On<T> by value."
    )]
    fn record(event: On<GameSyncError>, mut captured: ResMut<Captured>) {
        captured.0.push(event.event().clone());
    }

    #[rstest]
    fn missing_first_level_is_reported() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<Captured>();
        app.add_observer(record);
        app.add_plugins(SpartyPlugin::with_source(
            GameSettings::default(),
            Arc::new(NoLevels),
        ));
        assert!(app.world().contains_resource::<GameSettings>());
        assert!(app.world().contains_resource::<Game>());
        app.update();
        let captured = &app.world().resource::<Captured>().0;
        assert_eq!(captured.len(), 1);
        assert_eq!(
            captured.first().map(|err| err.context),
            Some(GameSyncErrorContext::Start)
        );
    }
}
