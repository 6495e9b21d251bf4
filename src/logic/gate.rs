//! Gate records and their transfer functions.

use glam::DVec2;

use super::{GateId, GateKind, PinId, Signal};
use crate::visitor::ItemVisitor;

/// State a sequential gate keeps between evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMemory {
    /// Combinational gates and the SR latch, whose memory is its output pins.
    Stateless,
    /// Clock value seen by the previous evaluation of a D flip-flop.
    PreviousClock(Signal),
}

impl GateMemory {
    /// Power-on memory for `kind`.
    #[must_use]
    pub const fn for_kind(kind: GateKind) -> Self {
        match kind {
            GateKind::D => Self::PreviousClock(Signal::Zero),
            _ => Self::Stateless,
        }
    }
}

/// Values to write to each output port; `None` leaves the port untouched.
pub type OutputWrites = [Option<Signal>; 2];

const HOLD: OutputWrites = [None, None];

/// Computes the output writes of a gate from its inputs.
///
/// The result depends only on `inputs` and, for the D flip-flop, on the
/// stored previous clock, which is updated to the current clock.
#[must_use]
pub fn transfer(kind: GateKind, inputs: &[Signal], memory: &mut GateMemory) -> OutputWrites {
    let first = inputs.first().copied().unwrap_or_default();
    let second = inputs.get(1).copied().unwrap_or_default();
    match kind {
        GateKind::And => [Some(first.and(second)), None],
        GateKind::Or => [Some(first.or(second)), None],
        GateKind::Not => [Some(!first), None],
        GateKind::Xor => [Some(first.xor(second)), None],
        GateKind::Sr => latch(first, second),
        GateKind::D => flip_flop(first, second, memory),
        GateKind::Input | GateKind::Output => HOLD,
    }
}

// Both inputs high clears both outputs rather than leaving them undefined.
const fn latch(set: Signal, reset: Signal) -> OutputWrites {
    match (set, reset) {
        (Signal::One, Signal::One) => [Some(Signal::Zero), Some(Signal::Zero)],
        (Signal::One, _) => [Some(Signal::One), Some(Signal::Zero)],
        (_, Signal::One) => [Some(Signal::Zero), Some(Signal::One)],
        _ => HOLD,
    }
}

fn flip_flop(clock: Signal, data: Signal, memory: &mut GateMemory) -> OutputWrites {
    let previous = match *memory {
        GateMemory::PreviousClock(previous) => previous,
        GateMemory::Stateless => Signal::Zero,
    };
    *memory = GateMemory::PreviousClock(clock);
    let rising = previous == Signal::Zero && clock == Signal::One;
    if rising && data.is_known() {
        [Some(data), Some(!data)]
    } else {
        HOLD
    }
}

/// A logic gate placed in the level.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    pub(crate) id: GateId,
    pub(crate) kind: GateKind,
    pub(crate) position: DVec2,
    pub(crate) inputs: Vec<PinId>,
    pub(crate) outputs: Vec<PinId>,
    pub(crate) memory: GateMemory,
    pub(crate) show_control: bool,
    pub(crate) retired: bool,
}

impl Gate {
    /// Arena handle.
    #[must_use]
    pub const fn id(&self) -> GateId {
        self.id
    }

    /// Variant of this gate.
    #[must_use]
    pub const fn kind(&self) -> GateKind {
        self.kind
    }

    /// Centre of the body.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Moves the gate; relative pins follow it.
    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }

    /// Width and height of the body.
    #[must_use]
    pub fn size(&self) -> DVec2 {
        self.kind.spec().size
    }

    /// Input pins in port order.
    #[must_use]
    pub fn inputs(&self) -> &[PinId] {
        &self.inputs
    }

    /// Output pins in port order.
    #[must_use]
    pub fn outputs(&self) -> &[PinId] {
        &self.outputs
    }

    /// Sequential memory.
    #[must_use]
    pub const fn memory(&self) -> GateMemory {
        self.memory
    }

    /// Whether output control points are drawn.
    #[must_use]
    pub const fn show_control(&self) -> bool {
        self.show_control
    }

    /// Toggles drawing of output control points.
    pub fn set_show_control(&mut self, show: bool) {
        self.show_control = show;
    }

    /// `true` once the gate has been removed from the scene.
    #[must_use]
    pub const fn is_retired(&self) -> bool {
        self.retired
    }

    /// Whether `point` lies on the body.
    ///
    /// The box is centred on the gate and includes its top and left edges,
    /// so a zero-sized bridge gate never reports a hit.
    #[must_use]
    pub fn hit_test(&self, point: DVec2) -> bool {
        let size = self.size();
        let local = point - self.position + size / 2.0;
        local.x >= 0.0 && local.y >= 0.0 && local.x < size.x && local.y < size.y
    }

    /// Dispatches to the kind-specific visitor method, then to
    /// [`ItemVisitor::visit_logic_gate`].
    pub fn accept(&mut self, visitor: &mut dyn ItemVisitor) {
        match self.kind {
            GateKind::And => visitor.visit_and_gate(self),
            GateKind::Or => visitor.visit_or_gate(self),
            GateKind::Not => visitor.visit_not_gate(self),
            GateKind::Xor => visitor.visit_xor_gate(self),
            GateKind::Sr => visitor.visit_sr_gate(self),
            GateKind::D => visitor.visit_d_gate(self),
            GateKind::Input => visitor.visit_input_gate(self),
            GateKind::Output => visitor.visit_output_gate(self),
        }
        visitor.visit_logic_gate(self);
    }
}

#[cfg(test)]
mod tests {
    use super::Signal::{One, Unknown, Zero};
    use super::*;
    use rstest::rstest;

    fn run(kind: GateKind, inputs: &[Signal]) -> OutputWrites {
        let mut memory = GateMemory::for_kind(kind);
        transfer(kind, inputs, &mut memory)
    }

    #[rstest]
    #[case(One, One, One)]
    #[case(Zero, One, Zero)]
    #[case(Zero, Unknown, Zero)]
    #[case(Unknown, One, Unknown)]
    #[case(Unknown, Unknown, Unknown)]
    fn and_gate(#[case] a: Signal, #[case] b: Signal, #[case] q: Signal) {
        assert_eq!(run(GateKind::And, &[a, b]), [Some(q), None]);
    }

    #[rstest]
    #[case(One, Unknown, One)]
    #[case(Zero, Zero, Zero)]
    #[case(Unknown, Zero, Unknown)]
    fn or_gate(#[case] a: Signal, #[case] b: Signal, #[case] q: Signal) {
        assert_eq!(run(GateKind::Or, &[a, b]), [Some(q), None]);
    }

    #[rstest]
    #[case(One, Zero, One)]
    #[case(One, One, Zero)]
    #[case(Unknown, One, Unknown)]
    fn xor_gate(#[case] a: Signal, #[case] b: Signal, #[case] q: Signal) {
        assert_eq!(run(GateKind::Xor, &[a, b]), [Some(q), None]);
    }

    #[rstest]
    #[case(One, [Some(One), Some(Zero)])]
    #[case(Zero, [Some(Zero), Some(One)])]
    #[case(Unknown, HOLD)]
    fn sr_latch_single_input(#[case] set: Signal, #[case] expected: OutputWrites) {
        let reset = if set == Zero { One } else { Zero };
        assert_eq!(run(GateKind::Sr, &[set, reset]), expected);
    }

    #[test]
    fn sr_latch_both_high_clears_both_outputs() {
        assert_eq!(run(GateKind::Sr, &[One, One]), [Some(Zero), Some(Zero)]);
    }

    #[test]
    fn flip_flop_latches_only_on_rising_edge() {
        let mut memory = GateMemory::for_kind(GateKind::D);
        assert_eq!(transfer(GateKind::D, &[Zero, One], &mut memory), HOLD);
        assert_eq!(
            transfer(GateKind::D, &[One, One], &mut memory),
            [Some(One), Some(Zero)]
        );
        assert_eq!(transfer(GateKind::D, &[One, Zero], &mut memory), HOLD);
        assert_eq!(memory, GateMemory::PreviousClock(One));
    }

    #[test]
    fn flip_flop_ignores_unknown_data() {
        let mut memory = GateMemory::for_kind(GateKind::D);
        assert_eq!(transfer(GateKind::D, &[One, Unknown], &mut memory), HOLD);
    }

    #[rstest]
    #[case(DVec2::new(100.0, 100.0), true)]
    #[case(DVec2::new(62.5, 75.0), true)]
    #[case(DVec2::new(137.5, 100.0), false)]
    #[case(DVec2::new(100.0, 125.0), false)]
    fn hit_test_uses_the_centred_box(#[case] point: DVec2, #[case] hit: bool) {
        let gate = Gate {
            id: GateId(0),
            kind: GateKind::And,
            position: DVec2::new(100.0, 100.0),
            inputs: Vec::new(),
            outputs: Vec::new(),
            memory: GateMemory::Stateless,
            show_control: false,
            retired: false,
        };
        assert_eq!(gate.hit_test(point), hit);
    }
}
