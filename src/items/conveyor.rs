//! Conveyor belt with its start/stop panel.

use glam::DVec2;

use crate::constants::{CONVEYOR_BELT_TILE, CONVEYOR_START_BUTTON, CONVEYOR_STOP_BUTTON};
use crate::geometry::Bounds;

/// What a click on the control panel did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// The belt started moving.
    Started,
    /// The belt stopped and will reset its products on the next start.
    Stopped,
}

/// Moves products downwards while started.
#[derive(Debug, Clone, PartialEq)]
pub struct Conveyor {
    position: DVec2,
    speed: f64,
    height: f64,
    panel: DVec2,
    started: bool,
    reset: bool,
    belt_offset: f64,
}

fn button((x, y, width, height): (f64, f64, f64, f64)) -> Bounds {
    Bounds::from_corner(DVec2::new(x, y), DVec2::new(width, height))
}

impl Conveyor {
    /// Creates a stopped conveyor. `panel` is the control panel offset from
    /// `position`.
    #[must_use]
    pub const fn new(position: DVec2, speed: f64, height: f64, panel: DVec2) -> Self {
        Self {
            position,
            speed,
            height,
            panel,
            started: false,
            reset: false,
            belt_offset: 0.0,
        }
    }

    /// Centre of the belt.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Belt speed in pixels per second.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Belt height.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Panel position in level space.
    #[must_use]
    pub fn panel_origin(&self) -> DVec2 {
        self.position + self.panel
    }

    /// `true` while the belt runs.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// `true` after a stop until products have been reset.
    #[must_use]
    pub const fn needs_reset(&self) -> bool {
        self.reset
    }

    /// Scroll offset of the belt texture.
    #[must_use]
    pub const fn belt_offset(&self) -> f64 {
        self.belt_offset
    }

    /// Starts the belt. Returns `false` if it was already running.
    pub fn start(&mut self) -> bool {
        let was_stopped = !self.started;
        self.started = true;
        was_stopped
    }

    /// Stops the belt and arms the product reset.
    pub fn stop(&mut self) {
        self.started = false;
        self.reset = true;
    }

    /// Disarms the product reset.
    pub fn clear_reset(&mut self) {
        self.reset = false;
    }

    /// Scrolls the belt texture.
    pub fn update(&mut self, elapsed: f64) {
        if self.started {
            self.belt_offset = (self.belt_offset - self.speed * elapsed).rem_euclid(CONVEYOR_BELT_TILE);
        }
    }

    /// Handles a click at `point`; the start button is ignored while running.
    pub fn click(&mut self, point: DVec2) -> Option<PanelAction> {
        let local = point - self.panel_origin();
        if !self.started && button(CONVEYOR_START_BUTTON).contains(local) {
            self.start();
            return Some(PanelAction::Started);
        }
        if button(CONVEYOR_STOP_BUTTON).contains(local) {
            self.stop();
            return Some(PanelAction::Stopped);
        }
        None
    }
}
