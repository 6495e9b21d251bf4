//! Pin records stored in the gate graph arena.

use glam::DVec2;

use super::{GateId, PinId, Signal};

/// Where a pin sits in level space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Offset from the owning gate's centre; follows the gate when it moves.
    Relative(DVec2),
    /// Fixed level position that ignores the owning gate.
    Anchored(DVec2),
}

/// Progress of a wire being dragged out of an output pin.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum WireDrag {
    /// No wire is being dragged.
    #[default]
    Committed,
    /// A wire follows the pointer and ends at `end`.
    Dragging {
        /// Current loose end of the wire.
        end: DVec2,
    },
}

/// Direction-specific pin state.
#[derive(Debug, Clone, PartialEq)]
pub enum PinKind {
    /// Receives a value from at most one output.
    Input {
        /// Output pin wired into this input.
        line: Option<PinId>,
    },
    /// Fans its value out to any number of inputs.
    Output {
        /// Connected inputs. Disconnecting an input clears its slot so the
        /// indices of the remaining slots never move.
        fan_out: Vec<Option<PinId>>,
        /// Interactive wiring state.
        drag: WireDrag,
    },
}

/// Signal endpoint owned by a gate.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub(crate) id: PinId,
    pub(crate) owner: GateId,
    pub(crate) label: &'static str,
    pub(crate) placement: Placement,
    pub(crate) signal: Signal,
    pub(crate) kind: PinKind,
}

impl Pin {
    pub(crate) const fn input(
        id: PinId,
        owner: GateId,
        label: &'static str,
        placement: Placement,
        signal: Signal,
    ) -> Self {
        Self {
            id,
            owner,
            label,
            placement,
            signal,
            kind: PinKind::Input { line: None },
        }
    }

    pub(crate) const fn output(
        id: PinId,
        owner: GateId,
        label: &'static str,
        placement: Placement,
        signal: Signal,
    ) -> Self {
        Self {
            id,
            owner,
            label,
            placement,
            signal,
            kind: PinKind::Output {
                fan_out: Vec::new(),
                drag: WireDrag::Committed,
            },
        }
    }

    /// Arena handle of this pin.
    #[must_use]
    pub const fn id(&self) -> PinId {
        self.id
    }

    /// Gate that owns this pin.
    #[must_use]
    pub const fn owner(&self) -> GateId {
        self.owner
    }

    /// Display label such as `S` or `Q'`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Current value.
    #[must_use]
    pub const fn signal(&self) -> Signal {
        self.signal
    }

    /// Positioning rule.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Direction-specific state.
    #[must_use]
    pub const fn kind(&self) -> &PinKind {
        &self.kind
    }

    /// `true` for input pins.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        matches!(self.kind, PinKind::Input { .. })
    }

    /// Source output for an input pin, `None` for outputs and loose inputs.
    #[must_use]
    pub const fn line(&self) -> Option<PinId> {
        match self.kind {
            PinKind::Input { line } => line,
            PinKind::Output { .. } => None,
        }
    }

    /// Inputs currently fed by this output, skipping cleared slots.
    pub fn targets(&self) -> impl Iterator<Item = PinId> + '_ {
        let slots: &[Option<PinId>] = match &self.kind {
            PinKind::Output { fan_out, .. } => fan_out,
            PinKind::Input { .. } => &[],
        };
        slots.iter().flatten().copied()
    }

    /// Level position of the pin given its owner's centre.
    #[must_use]
    pub fn location(&self, owner_position: DVec2) -> DVec2 {
        match self.placement {
            Placement::Relative(offset) => owner_position + offset,
            Placement::Anchored(at) => at,
        }
    }

    /// Whether `point` falls within `radius` of the pin.
    #[must_use]
    pub fn captures(&self, owner_position: DVec2, point: DVec2, radius: f64) -> bool {
        self.location(owner_position).distance_squared(point) < radius * radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn input_at(placement: Placement) -> Pin {
        Pin::input(PinId(0), GateId(0), "A", placement, Signal::Unknown)
    }

    #[rstest]
    #[case(DVec2::new(109.0, 100.0), true)]
    #[case(DVec2::new(107.0, 107.0), true)]
    #[case(DVec2::new(110.0, 100.0), false)]
    #[case(DVec2::new(100.0, 115.0), false)]
    fn capture_is_a_strict_radius(#[case] point: DVec2, #[case] caught: bool) {
        let pin = input_at(Placement::Relative(DVec2::new(-50.0, 0.0)));
        assert_eq!(pin.captures(DVec2::new(150.0, 100.0), point, 10.0), caught);
    }

    #[test]
    fn anchored_pins_ignore_the_owner() {
        let pin = input_at(Placement::Anchored(DVec2::new(800.0, 500.0)));
        assert_eq!(pin.location(DVec2::new(1.0, 2.0)), DVec2::new(800.0, 500.0));
    }

    #[test]
    fn cleared_slots_are_skipped() {
        let mut pin = Pin::output(PinId(3), GateId(1), "Q", Placement::Relative(DVec2::ZERO), Signal::Zero);
        if let PinKind::Output { fan_out, .. } = &mut pin.kind {
            fan_out.extend([Some(PinId(4)), None, Some(PinId(6))]);
        }
        assert_eq!(pin.targets().collect::<Vec<_>>(), vec![PinId(4), PinId(6)]);
    }
}
