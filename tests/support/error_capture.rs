//! Shared helpers for observing `GameSyncError` events in tests.
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use sparty::plugin::{GameSyncError, GameSyncErrorContext};

/// Game errors raised by the plugin's systems, in order.
#[derive(Resource, Default, Debug)]
pub struct CapturedErrors(pub Vec<(GameSyncErrorContext, String)>);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_error(event: On<GameSyncError>, mut errors: ResMut<CapturedErrors>) {
    let err = event.event();
    errors.0.push((err.context, err.detail.clone()));
}

/// Installs the error-capturing observer and resource on the provided app.
pub fn install_error_observer(app: &mut App) {
    app.insert_resource(CapturedErrors::default());
    app.world_mut().add_observer(record_error);
}
