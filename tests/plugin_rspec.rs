//! Behavioural tests for `SpartyPlugin` driving a game from Bevy's clock.
//!
//! The app runs with `MinimalPlugins` and a manual time step of one frame
//! period, so each `update` advances the game by exactly one frame.

#[path = "support/thread_safe_app.rs"]
mod thread_safe_app;

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

#[path = "support/error_capture.rs"]
mod error_capture;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use glam::DVec2;
use rspec::block::Context as Scenario;
use rspec_runner::run_serial;
use sparty::items::Scoreboard;
use sparty::plugin::GameSyncErrorContext;
use sparty::visitor::ScoreboardVisitor;
use sparty::{Game, GameSettings, LevelPhase, SpartyPlugin};
use test_utils::{sorting_level, InlineLevels};
use thread_safe_app::{lock_app, SharedApp, ThreadSafeApp};

const START_BUTTON: DVec2 = DVec2::new(190.0, 430.0);

fn build_app() -> App {
    let settings = GameSettings::default();
    let period = Duration::from_secs_f64(settings.frame_period);
    let levels = InlineLevels::new().with(1, sorting_level(false));
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(period));
    error_capture::install_error_observer(&mut app);
    app.add_plugins(SpartyPlugin::with_source(settings, Arc::new(levels)));
    app
}

#[derive(Debug, Clone)]
struct PluginFixture {
    app: SharedApp,
}

impl PluginFixture {
    fn bootstrap() -> Self {
        Self {
            app: Arc::new(Mutex::new(ThreadSafeApp(build_app()))),
        }
    }

    fn app_guard(&self) -> MutexGuard<'_, ThreadSafeApp> {
        lock_app(&self.app)
    }

    fn reset(&self) {
        self.app_guard().0 = build_app();
    }

    fn tick(&self, frames: usize) {
        let mut app = self.app_guard();
        for _ in 0..frames {
            app.update();
        }
    }

    fn with_game<R>(&self, f: impl FnOnce(&mut Game) -> R) -> R {
        let mut app = self.app_guard();
        let mut game = app.world_mut().resource_mut::<Game>();
        f(&mut game)
    }

    fn press_start(&self) {
        self.with_game(|game| game.click(START_BUTTON));
    }

    fn level_score(&self) -> i32 {
        self.with_game(|game| {
            let mut score = 0;
            game.accept(&mut ScoreboardVisitor::new(|board: &mut Scoreboard| {
                score = board.level_score();
            }));
            score
        })
    }

    fn errors(&self) -> Vec<(GameSyncErrorContext, String)> {
        self.app_guard()
            .world()
            .resource::<error_capture::CapturedErrors>()
            .0
            .clone()
    }
}

#[test]
fn plugin_runs_a_level_from_the_app_clock() {
    let fixture = PluginFixture::bootstrap();
    run_serial(&rspec::given(
        "an app running the sorting level",
        fixture,
        |scenario: &mut Scenario<PluginFixture>| {
            scenario.before_each(|state| {
                state.reset();
                state.tick(1);
            });

            scenario.then("the first level is loaded at startup", |state| {
                assert_eq!(state.with_game(|game| game.level()), 1);
                assert!(!state.with_game(|game| game.scene().is_empty()));
                assert!(state.errors().is_empty());
            });

            scenario.when("the player starts the belt", |scenario| {
                scenario.before_each(|state| {
                    state.press_start();
                    state.tick(70);
                });

                scenario.then("the product is scored once it clears the beam", |state| {
                    assert_eq!(state.level_score(), 10);
                    assert_eq!(state.with_game(|game| game.phase()), LevelPhase::Playing);
                });
            });

            scenario.when("the level runs to completion", |scenario| {
                scenario.before_each(|state| {
                    state.press_start();
                    state.tick(500);
                });

                scenario.then("the score is banked", |state| {
                    assert_eq!(state.with_game(|game| game.game_score()), 10);
                });

                scenario.then("the missing next level is reported once", |state| {
                    let errors = state.errors();
                    assert_eq!(errors.len(), 1);
                    let (context, detail) = errors.first().cloned().unwrap_or_else(|| {
                        panic!("a tick error should have been observed")
                    });
                    assert_eq!(context, GameSyncErrorContext::Tick);
                    assert!(detail.contains("no level numbered 2"), "{detail}");
                    assert_eq!(state.with_game(|game| game.level()), 1);
                });
            });
        },
    ));
}
