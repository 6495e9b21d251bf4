//! Game tuning constants shared across modules.
//!
//! Distances are in virtual (level) pixels, durations in seconds.

/// Radius within which a dropped wire attaches to an input pin, and within
/// which a press picks up an output pin.
pub const PIN_CAPTURE_RADIUS: f64 = 10.0;
/// Longest chain of gate recomputations one write may trigger.
pub const DEFAULT_MAX_PROPAGATION_DEPTH: usize = 64;

/// Level width used when the document omits `size`.
pub const DEFAULT_LEVEL_WIDTH: f64 = 1150.0;
/// Level height used when the document omits `size`.
pub const DEFAULT_LEVEL_HEIGHT: f64 = 800.0;
/// Highest level number shipped with the game.
pub const LAST_LEVEL: u32 = 8;
/// Nominal frame period; longer frames are clamped to this.
pub const FRAME_PERIOD: f64 = 1.0 / 60.0;

/// Products are square with this side length.
pub const PRODUCT_SIZE: f64 = 80.0;
/// Time between the last product leaving the beam and the level completing.
pub const LAST_PRODUCT_DELAY: f64 = 3.0;
/// Time between level completion and loading the next level.
pub const LEVEL_LOAD_DELAY: f64 = 3.0;
/// How long the level banner stays visible.
pub const BANNER_DURATION: f64 = 2.0;

/// Horizontal distance from a beam receiver to its output pin.
pub const BEAM_PIN_OFFSET: f64 = 80.0;

/// Width of the sensor camera, which is also the horizontal detection span.
pub const SENSOR_CAMERA_WIDTH: f64 = 100.0;
/// Width of the cable image the output panels hang from.
pub const SENSOR_CABLE_WIDTH: f64 = 20.0;
/// Vertical detection band relative to the sensor, top then bottom.
pub const SENSOR_RANGE: (f64, f64) = (-40.0, 15.0);
/// Offset from the sensor to its first output panel.
pub const SENSOR_PANEL_OFFSET_Y: f64 = 87.0;
/// Width of one output panel.
pub const SENSOR_PANEL_WIDTH: f64 = 100.0;
/// Height of one output panel.
pub const SENSOR_PANEL_HEIGHT: f64 = 40.0;
/// Length of the lead between a panel and its output pin.
pub const SENSOR_LEAD_LENGTH: f64 = 20.0;

/// Fraction of Sparty's height, from the top, where the boot strikes.
pub const SPARTY_BOOT_FRACTION: f64 = 0.8;
/// Fraction of a kick spent swinging the boot out.
pub const SPARTY_KICK_POINT: f64 = 0.35;
/// Boot rotation at the kick point, in radians.
pub const SPARTY_BOOT_MAX_ROTATION: f64 = 0.8;

/// Start button relative to the conveyor panel: x, y, width, height.
pub const CONVEYOR_START_BUTTON: (f64, f64, f64, f64) = (35.0, 29.0, 95.0, 36.0);
/// Stop button relative to the conveyor panel: x, y, width, height.
pub const CONVEYOR_STOP_BUTTON: (f64, f64, f64, f64) = (35.0, 87.0, 95.0, 36.0);
/// Height of one belt image tile; the belt offset wraps at this value.
pub const CONVEYOR_BELT_TILE: f64 = 100.0;

/// Points for a correctly sorted product unless the level overrides it.
pub const DEFAULT_GOOD_SCORE: i32 = 10;
/// Points for a wrongly sorted product unless the level overrides it.
pub const DEFAULT_BAD_SCORE: i32 = 0;
