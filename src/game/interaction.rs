//! Pointer interaction: wiring, moving gates and panel clicks.
//!
//! Hit tests walk the scene front to back so the top-most item wins.

use glam::DVec2;
use log::debug;

use super::{Game, GameError};
use crate::items::{Item, ItemId, PanelAction, Scoreboard};
use crate::logic::{GateId, PinId};
use crate::visitor::{ConveyorControlVisitor, ScoreboardVisitor, ToggleControlPointsVisitor};

/// What the pointer is holding between press and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grab {
    /// A wire dragged out of an output pin.
    Wire(PinId),
    /// A gate being moved.
    Gate {
        /// Gate in the graph.
        gate: GateId,
        /// Its scene item.
        item: ItemId,
    },
}

impl Game {
    /// Current grab, if any.
    #[must_use]
    pub const fn grab(&self) -> Option<Grab> {
        self.grab
    }

    fn gates_front_to_back(&self) -> Vec<(ItemId, GateId)> {
        self.scene
            .iter()
            .rev()
            .filter_map(|(id, item)| match item {
                Item::Gate(gate) => Some((id, *gate)),
                _ => None,
            })
            .collect()
    }

    /// Presses at `point`: an output pin starts a wire drag, a gate body
    /// is picked up and brought to the front.
    ///
    /// # Errors
    /// Fails when a gate handle in the scene no longer resolves.
    pub fn press(&mut self, point: DVec2) -> Result<Option<Grab>, GameError> {
        self.grab = None;
        for (item, gate) in self.gates_front_to_back() {
            let graph = self.scene.graph_mut();
            if let Some(pin) = graph.hit_output(gate, point)? {
                graph.begin_drag(pin, point)?;
                debug!("dragging wire from {pin:?}");
                self.grab = Some(Grab::Wire(pin));
                break;
            }
            if graph.hit_test(gate, point)? {
                self.scene.bring_to_front(item);
                self.grab = Some(Grab::Gate { gate, item });
                break;
            }
        }
        Ok(self.grab)
    }

    /// Moves whatever is grabbed to `point`.
    ///
    /// # Errors
    /// Fails when the grabbed gate or pin has gone away.
    pub fn drag(&mut self, point: DVec2) -> Result<(), GameError> {
        let graph = self.scene.graph_mut();
        match self.grab {
            Some(Grab::Wire(pin)) => graph.drag_wire(pin, point)?,
            Some(Grab::Gate { gate, .. }) => graph.gate_mut(gate)?.set_position(point),
            None => {}
        }
        Ok(())
    }

    /// Lets go at `point`. A dragged wire is offered to the gates front to
    /// back and the first one with an input pin in range catches it.
    ///
    /// Returns `true` when a wire was connected.
    ///
    /// # Errors
    /// Fails when connecting propagates too deep or a handle is stale.
    pub fn release(&mut self, point: DVec2) -> Result<bool, GameError> {
        let Some(Grab::Wire(pin)) = self.grab.take() else {
            return Ok(false);
        };
        let graph = self.scene.graph_mut();
        graph.drag_wire(pin, point)?;
        let end = graph.release_wire(pin)?.unwrap_or(point);
        for (_, gate) in self.gates_front_to_back() {
            if self.scene.graph_mut().catch(gate, pin, end)? {
                debug!("wire from {pin:?} caught by {gate:?}");
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Forwards a click to the conveyor panels. Starting a belt zeroes the
    /// level score.
    pub fn click(&mut self, point: DVec2) -> Option<PanelAction> {
        let mut control = ConveyorControlVisitor::new(point);
        self.scene.accept(&mut control);
        let (conveyor, action) = control.action()?;
        debug!("conveyor {conveyor:?} {action:?}");
        if action == PanelAction::Started {
            self.scene
                .accept(&mut ScoreboardVisitor::new(Scoreboard::reset_level_score));
        }
        Some(action)
    }

    /// Shows or hides the control points of every gate.
    pub fn show_control_points(&mut self, show: bool) {
        self.scene.accept(&mut ToggleControlPointsVisitor::new(show));
    }
}
