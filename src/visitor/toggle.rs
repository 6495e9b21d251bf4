//! Shows or hides gate control points.

use super::ItemVisitor;
use crate::logic::Gate;

/// Sets the control-point flag on every gate through the family method.
#[derive(Debug, Clone, Copy)]
pub struct ToggleControlPointsVisitor {
    show: bool,
}

impl ToggleControlPointsVisitor {
    /// Visitor that sets every gate's flag to `show`.
    #[must_use]
    pub const fn new(show: bool) -> Self {
        Self { show }
    }
}

impl ItemVisitor for ToggleControlPointsVisitor {
    fn visit_logic_gate(&mut self, gate: &mut Gate) {
        gate.set_show_control(self.show);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Item, ItemId};
    use crate::logic::{GateGraph, GateKind};
    use glam::DVec2;

    #[test]
    fn reaches_every_gate_kind() {
        let mut graph = GateGraph::default();
        let gates: Vec<_> = GateKind::ALL
            .iter()
            .map(|kind| graph.add_gate(*kind, DVec2::ZERO))
            .collect();
        let mut visitor = ToggleControlPointsVisitor::new(true);
        for gate in &gates {
            Item::Gate(*gate).accept(ItemId(0), &mut graph, &mut visitor);
        }
        assert!(graph.live_gates().all(Gate::show_control));
    }
}
