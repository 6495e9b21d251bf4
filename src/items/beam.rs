//! Light beam that reports products crossing it.

use glam::DVec2;

use crate::constants::BEAM_PIN_OFFSET;
use crate::geometry::Bounds;
use crate::logic::GateId;

/// A sender/receiver pair with an output pin that reads `One` while a
/// product interrupts the beam.
#[derive(Debug, Clone, PartialEq)]
pub struct Beam {
    position: DVec2,
    sender_offset: f64,
    gate: GateId,
    detected: bool,
}

impl Beam {
    /// Creates a beam whose receiver sits at `position` and whose sender is
    /// `sender_offset` pixels away horizontally. `gate` is the output bridge
    /// gate carrying the detection signal.
    #[must_use]
    pub const fn new(position: DVec2, sender_offset: f64, gate: GateId) -> Self {
        Self {
            position,
            sender_offset,
            gate,
            detected: false,
        }
    }

    /// Where the output pin of a beam at `position` is placed.
    #[must_use]
    pub fn pin_location(position: DVec2) -> DVec2 {
        position + DVec2::new(BEAM_PIN_OFFSET, 0.0)
    }

    /// Receiver position.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Horizontal offset of the sender from the receiver.
    #[must_use]
    pub const fn sender_offset(&self) -> f64 {
        self.sender_offset
    }

    /// Output bridge gate.
    #[must_use]
    pub const fn gate(&self) -> GateId {
        self.gate
    }

    /// Detection state written by the last frame.
    #[must_use]
    pub const fn detected(&self) -> bool {
        self.detected
    }

    /// Stores this frame's detection state.
    pub fn set_detected(&mut self, detected: bool) {
        self.detected = detected;
    }

    /// Whether `bounds` strictly crosses the line between sender and
    /// receiver.
    #[must_use]
    pub fn crosses(&self, bounds: &Bounds) -> bool {
        let sender = self.position.x + self.sender_offset;
        let (left, right) = if sender <= self.position.x {
            (sender, self.position.x)
        } else {
            (self.position.x, sender)
        };
        let y = self.position.y;
        bounds.right() > left && bounds.left() < right && bounds.bottom() > y && bounds.top() < y
    }
}
