//! Per-kind gate configuration: body size, pin layout and power-on values.
//!
//! Offsets are relative to the gate centre with Y growing downwards, the
//! same convention used for every other position in the level.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::Signal;

/// Every gate variant the graph can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Two-input conjunction.
    And,
    /// Two-input disjunction.
    Or,
    /// Inverter.
    Not,
    /// Two-input exclusive or.
    Xor,
    /// Set/reset latch with inputs `S`, `R` and outputs `Q`, `Q'`.
    Sr,
    /// Edge-triggered D flip-flop with inputs `Clock`, `D` and outputs `Q`, `Q'`.
    D,
    /// Bridge exposing one input pin to a non-gate item.
    Input,
    /// Bridge exposing one output pin driven by a non-gate item.
    Output,
}

/// Layout of one pin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinSpec {
    /// Display label.
    pub label: &'static str,
    /// Offset from the gate centre.
    pub offset: DVec2,
    /// Value the pin holds when the gate is created.
    pub initial: Signal,
}

/// Static description of a gate kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateSpec {
    /// Name used in level documents.
    pub name: &'static str,
    /// Width and height of the body.
    pub size: DVec2,
    /// Input pins in port order.
    pub inputs: &'static [PinSpec],
    /// Output pins in port order.
    pub outputs: &'static [PinSpec],
}

const fn pin(label: &'static str, x: f64, y: f64, initial: Signal) -> PinSpec {
    PinSpec {
        label,
        offset: DVec2::new(x, y),
        initial,
    }
}

const TWO_INPUT: DVec2 = DVec2::new(75.0, 50.0);
const SQUARE: DVec2 = DVec2::new(50.0, 50.0);
const TALL: DVec2 = DVec2::new(50.0, 75.0);

static AND: GateSpec = GateSpec {
    name: "and",
    size: TWO_INPUT,
    inputs: &[
        pin("A", -TWO_INPUT.x / 1.3, -TWO_INPUT.y / 4.5, Signal::Unknown),
        pin("B", -TWO_INPUT.x / 1.3, TWO_INPUT.y / 4.5, Signal::Unknown),
    ],
    outputs: &[pin("Q", TWO_INPUT.x / 1.25, 0.0, Signal::Unknown)],
};

static OR: GateSpec = GateSpec {
    name: "or",
    size: TWO_INPUT,
    inputs: &[
        pin("A", -TWO_INPUT.x / 1.5, -TWO_INPUT.y / 4.5, Signal::Unknown),
        pin("B", -TWO_INPUT.x / 1.5, TWO_INPUT.y / 4.5, Signal::Unknown),
    ],
    outputs: &[pin("Q", TWO_INPUT.x / 1.5, 0.0, Signal::Unknown)],
};

static NOT: GateSpec = GateSpec {
    name: "not",
    size: SQUARE,
    inputs: &[pin("A", -SQUARE.x / 1.3, 0.0, Signal::Unknown)],
    outputs: &[pin("Q", SQUARE.x, 0.0, Signal::Unknown)],
};

static XOR: GateSpec = GateSpec {
    name: "xor",
    size: TWO_INPUT,
    inputs: &[
        pin("A", -TWO_INPUT.x / 1.3, -TWO_INPUT.y / 4.5, Signal::Unknown),
        pin("B", -TWO_INPUT.x / 1.3, TWO_INPUT.y / 4.5, Signal::Unknown),
    ],
    outputs: &[pin("Q", TWO_INPUT.x / 1.25, 0.0, Signal::Unknown)],
};

static SR: GateSpec = GateSpec {
    name: "sr",
    size: TALL,
    inputs: &[
        pin("S", -TALL.x / 1.2, -TALL.y / 2.75, Signal::Unknown),
        pin("R", -TALL.x / 1.2, TALL.y / 2.75, Signal::Unknown),
    ],
    outputs: &[
        pin("Q", TALL.x / 1.2, -TALL.y / 2.75, Signal::Zero),
        pin("Q'", TALL.x / 1.2, TALL.y / 2.75, Signal::One),
    ],
};

static D: GateSpec = GateSpec {
    name: "d",
    size: TALL,
    inputs: &[
        pin("Clock", -TALL.x / 1.2, TALL.y / 4.0, Signal::Unknown),
        pin("D", -TALL.x / 1.2, -TALL.y / 4.0, Signal::Unknown),
    ],
    outputs: &[
        pin("Q", TALL.x / 1.2, TALL.y / 4.0, Signal::One),
        pin("Q'", TALL.x / 1.2, -TALL.y / 4.0, Signal::Zero),
    ],
};

static INPUT: GateSpec = GateSpec {
    name: "input",
    size: DVec2::ZERO,
    inputs: &[pin("In", 0.0, 0.0, Signal::Unknown)],
    outputs: &[],
};

static OUTPUT: GateSpec = GateSpec {
    name: "output",
    size: DVec2::ZERO,
    inputs: &[],
    outputs: &[pin("Out", 0.0, 0.0, Signal::Zero)],
};

impl GateKind {
    /// All kinds in declaration order.
    pub const ALL: [Self; 8] = [
        Self::And,
        Self::Or,
        Self::Not,
        Self::Xor,
        Self::Sr,
        Self::D,
        Self::Input,
        Self::Output,
    ];

    /// Returns the static layout for this kind.
    #[must_use]
    pub fn spec(self) -> &'static GateSpec {
        match self {
            Self::And => &AND,
            Self::Or => &OR,
            Self::Not => &NOT,
            Self::Xor => &XOR,
            Self::Sr => &SR,
            Self::D => &D,
            Self::Input => &INPUT,
            Self::Output => &OUTPUT,
        }
    }

    /// Looks up a kind by its level-document name.
    ///
    /// # Examples
    /// ```
    /// use sparty::logic::GateKind;
    /// assert_eq!(GateKind::from_name("xor"), Some(GateKind::Xor));
    /// assert_eq!(GateKind::from_name("nand"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.spec().name == name)
    }

    /// Bridge gates connect non-gate items to the graph and cannot be placed
    /// by the player.
    #[must_use]
    pub const fn is_bridge(self) -> bool {
        matches!(self, Self::Input | Self::Output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(GateKind::And, 2, 1)]
    #[case(GateKind::Or, 2, 1)]
    #[case(GateKind::Not, 1, 1)]
    #[case(GateKind::Xor, 2, 1)]
    #[case(GateKind::Sr, 2, 2)]
    #[case(GateKind::D, 2, 2)]
    #[case(GateKind::Input, 1, 0)]
    #[case(GateKind::Output, 0, 1)]
    fn port_counts(#[case] kind: GateKind, #[case] inputs: usize, #[case] outputs: usize) {
        let spec = kind.spec();
        assert_eq!(spec.inputs.len(), inputs);
        assert_eq!(spec.outputs.len(), outputs);
    }

    #[test]
    fn and_gate_pins_sit_outside_the_body() {
        let spec = GateKind::And.spec();
        let input = spec.inputs.first().map(|p| p.offset).unwrap_or_default();
        assert_relative_eq!(input.x, -75.0 / 1.3);
        assert_relative_eq!(input.y, -50.0 / 4.5);
        assert!(input.x.abs() > spec.size.x / 2.0);
    }

    #[test]
    fn every_name_round_trips() {
        for kind in GateKind::ALL {
            assert_eq!(GateKind::from_name(kind.spec().name), Some(kind));
        }
    }
}
