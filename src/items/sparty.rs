//! Sparty, the kicking actuator driven by a logic input.

use glam::DVec2;

use super::Product;
use crate::constants::{SPARTY_BOOT_FRACTION, SPARTY_BOOT_MAX_ROTATION, SPARTY_KICK_POINT};
use crate::logic::{GateId, Signal};

/// Configuration read from a `<sparty>` record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpartyConfig {
    /// Drawn height; also sets where the boot strikes.
    pub height: f64,
    /// Fixed location of the input pin.
    pub pin: DVec2,
    /// Seconds a full kick takes.
    pub kick_duration: f64,
    /// Sideways speed given to kicked products.
    pub kick_speed: f64,
}

/// Kicks products off the belt when its input rises from `Zero` to `One`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sparty {
    position: DVec2,
    config: SpartyConfig,
    gate: GateId,
    kick_time: Option<f64>,
    boot_rotation: f64,
    previous: Signal,
}

impl Sparty {
    /// Creates an idle Sparty reading from the input bridge gate `gate`.
    #[must_use]
    pub const fn new(position: DVec2, config: SpartyConfig, gate: GateId) -> Self {
        Self {
            position,
            config,
            gate,
            kick_time: None,
            boot_rotation: 0.0,
            previous: Signal::Unknown,
        }
    }

    /// Centre.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Load-time configuration.
    #[must_use]
    pub const fn config(&self) -> SpartyConfig {
        self.config
    }

    /// Input bridge gate.
    #[must_use]
    pub const fn gate(&self) -> GateId {
        self.gate
    }

    /// `true` while the boot is swinging.
    #[must_use]
    pub const fn is_kicking(&self) -> bool {
        self.kick_time.is_some()
    }

    /// Current boot rotation in radians.
    #[must_use]
    pub const fn boot_rotation(&self) -> f64 {
        self.boot_rotation
    }

    /// Y coordinate the boot sweeps through.
    #[must_use]
    pub fn kick_line(&self) -> f64 {
        let height = self.config.height;
        self.position.y - height / 2.0 + (height * SPARTY_BOOT_FRACTION).trunc()
    }

    /// Whether the product's vertical extent covers the kick line.
    #[must_use]
    pub fn in_kick_range(&self, product: &Product) -> bool {
        let line = self.kick_line();
        product.bounds().touches_band(line, line)
    }

    /// Advances the kick animation and starts a new kick on a rising edge
    /// of `input`.
    pub fn update(&mut self, input: Signal, elapsed: f64) {
        if input == Signal::One && self.previous == Signal::Zero && self.kick_time.is_none() {
            log::debug!("sparty kick started");
            self.kick_time = Some(0.0);
        }
        if let Some(time) = self.kick_time {
            self.animate(time + elapsed);
        }
        self.previous = input;
    }

    fn animate(&mut self, time: f64) {
        let duration = self.config.kick_duration;
        if duration <= 0.0 || time > duration {
            self.kick_time = None;
            self.boot_rotation = 0.0;
            return;
        }
        self.kick_time = Some(time);
        let progress = time / duration;
        self.boot_rotation = if progress <= SPARTY_KICK_POINT {
            progress / SPARTY_KICK_POINT * SPARTY_BOOT_MAX_ROTATION
        } else {
            let returning = (progress - SPARTY_KICK_POINT) / (1.0 - SPARTY_KICK_POINT);
            SPARTY_BOOT_MAX_ROTATION * (1.0 - returning)
        };
    }
}
