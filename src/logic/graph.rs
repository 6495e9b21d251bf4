//! Arena of gates and pins with eager propagation.

use glam::DVec2;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::gate::{transfer, Gate, GateMemory};
use super::pin::{Pin, PinKind, Placement, WireDrag};
use super::{GateId, GateKind, GraphError, PinId, PropagationError, Signal};
use crate::constants::{DEFAULT_MAX_PROPAGATION_DEPTH, PIN_CAPTURE_RADIUS};

/// Tunables for a [`GateGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Longest chain of gate recomputations a single write may trigger.
    pub max_depth: usize,
    /// Distance within which a dropped wire end attaches to an input pin.
    pub capture_radius: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_PROPAGATION_DEPTH,
            capture_radius: PIN_CAPTURE_RADIUS,
        }
    }
}

/// Owns every gate and pin in a level.
#[derive(Debug, Clone, Default)]
pub struct GateGraph {
    gates: Vec<Gate>,
    pins: Vec<Pin>,
    config: GraphConfig,
}

impl GateGraph {
    /// Creates an empty graph.
    #[must_use]
    pub const fn new(config: GraphConfig) -> Self {
        Self {
            gates: Vec::new(),
            pins: Vec::new(),
            config,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> GraphConfig {
        self.config
    }

    /// Adds a gate of `kind` centred at `position`, with pins laid out and
    /// initialised from the kind's catalog entry.
    pub fn add_gate(&mut self, kind: GateKind, position: DVec2) -> GateId {
        let id = GateId(self.gates.len());
        let spec = kind.spec();
        let mut inputs = Vec::with_capacity(spec.inputs.len());
        for pin in spec.inputs {
            let pin_id = PinId(self.pins.len());
            self.pins.push(Pin::input(
                pin_id,
                id,
                pin.label,
                Placement::Relative(pin.offset),
                pin.initial,
            ));
            inputs.push(pin_id);
        }
        let mut outputs = Vec::with_capacity(spec.outputs.len());
        for pin in spec.outputs {
            let pin_id = PinId(self.pins.len());
            self.pins.push(Pin::output(
                pin_id,
                id,
                pin.label,
                Placement::Relative(pin.offset),
                pin.initial,
            ));
            outputs.push(pin_id);
        }
        self.gates.push(Gate {
            id,
            kind,
            position,
            inputs,
            outputs,
            memory: GateMemory::for_kind(kind),
            show_control: false,
            retired: false,
        });
        debug!("added {kind:?} gate {id:?} at {position}");
        id
    }

    /// Number of gates ever added, retired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// `true` when no gate was ever added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Gates still present in the scene.
    pub fn live_gates(&self) -> impl Iterator<Item = &Gate> {
        self.gates.iter().filter(|gate| !gate.retired)
    }

    /// Looks up a gate.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownGate`] for a foreign handle.
    pub fn gate(&self, id: GateId) -> Result<&Gate, GraphError> {
        self.gates.get(id.0).ok_or(GraphError::UnknownGate(id))
    }

    /// Looks up a gate mutably.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownGate`] for a foreign handle.
    pub fn gate_mut(&mut self, id: GateId) -> Result<&mut Gate, GraphError> {
        self.gates.get_mut(id.0).ok_or(GraphError::UnknownGate(id))
    }

    /// Looks up a pin.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownPin`] for a foreign handle.
    pub fn pin(&self, id: PinId) -> Result<&Pin, GraphError> {
        self.pins.get(id.0).ok_or(GraphError::UnknownPin(id))
    }

    fn pin_mut(&mut self, id: PinId) -> Result<&mut Pin, GraphError> {
        self.pins.get_mut(id.0).ok_or(GraphError::UnknownPin(id))
    }

    /// Current value of a pin.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownPin`] for a foreign handle.
    pub fn state(&self, pin: PinId) -> Result<Signal, GraphError> {
        self.pin(pin).map(Pin::signal)
    }

    /// Input pin at `port` of `gate`.
    ///
    /// # Errors
    /// Fails when the gate is unknown or has fewer inputs.
    pub fn input_pin(&self, gate: GateId, port: usize) -> Result<PinId, GraphError> {
        self.gate(gate)?
            .inputs
            .get(port)
            .copied()
            .ok_or(GraphError::NoSuchPort { gate, port })
    }

    /// Output pin at `port` of `gate`.
    ///
    /// # Errors
    /// Fails when the gate is unknown or has fewer outputs.
    pub fn output_pin(&self, gate: GateId, port: usize) -> Result<PinId, GraphError> {
        self.gate(gate)?
            .outputs
            .get(port)
            .copied()
            .ok_or(GraphError::NoSuchPort { gate, port })
    }

    /// Level position of a pin.
    ///
    /// # Errors
    /// Fails when the pin or its owner is unknown.
    pub fn pin_location(&self, pin: PinId) -> Result<DVec2, GraphError> {
        let record = self.pin(pin)?;
        let owner = self.gate(record.owner)?;
        Ok(record.location(owner.position))
    }

    /// Pins `pin` to a fixed level position regardless of its gate.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownPin`] for a foreign handle.
    pub fn anchor_pin(&mut self, pin: PinId, at: DVec2) -> Result<(), GraphError> {
        self.pin_mut(pin)?.placement = Placement::Anchored(at);
        Ok(())
    }

    /// Every committed wire as `(output, input)` pairs.
    pub fn wires(&self) -> impl Iterator<Item = (PinId, PinId)> + '_ {
        self.pins
            .iter()
            .filter_map(|pin| pin.line().map(|source| (source, pin.id)))
    }

    /// Writes an input pin and synchronously recomputes its gate.
    ///
    /// # Errors
    /// Fails for unknown or non-input pins, retired gates, and when the
    /// resulting propagation runs deeper than the configured limit.
    pub fn set_input(&mut self, pin: PinId, value: Signal) -> Result<(), PropagationError> {
        self.ensure_live_owner(pin)?;
        self.write_input(pin, value, 0)
    }

    /// Writes an output pin and, when the value changes, pushes it into
    /// every connected input.
    ///
    /// # Errors
    /// Fails for unknown or non-output pins, retired gates, and when the
    /// resulting propagation runs deeper than the configured limit.
    pub fn set_output(&mut self, pin: PinId, value: Signal) -> Result<(), PropagationError> {
        self.ensure_live_owner(pin)?;
        self.write_output(pin, value, 0)
    }

    /// Re-evaluates `gate` from its current inputs.
    ///
    /// # Errors
    /// Fails when the gate is unknown or propagation runs too deep.
    pub fn compute_output(&mut self, gate: GateId) -> Result<(), PropagationError> {
        self.recompute(gate, 1)
    }

    /// Binds `output` to `input`, replacing any previous source of `input`,
    /// then pushes the output's current value into it.
    ///
    /// # Errors
    /// Fails when either pin is unknown, has the wrong direction, belongs to
    /// a retired gate, or when propagation runs too deep.
    pub fn connect(&mut self, output: PinId, input: PinId) -> Result<(), PropagationError> {
        self.ensure_live_owner(output)?;
        self.ensure_live_owner(input)?;
        let (value, is_output) = {
            let source = self.pin(output)?;
            (source.signal, !source.is_input())
        };
        if !is_output {
            return Err(GraphError::NotAnOutput(output).into());
        }
        let previous = match &mut self.pin_mut(input)?.kind {
            PinKind::Input { line } => line.replace(output),
            PinKind::Output { .. } => return Err(GraphError::NotAnInput(input).into()),
        };
        match previous {
            Some(source) if source == output => {}
            Some(source) => {
                self.clear_slot(source, input)?;
                self.push_slot(output, input)?;
            }
            None => self.push_slot(output, input)?,
        }
        debug!("wired {output:?} -> {input:?} carrying {value}");
        self.write_input(input, value, 0)
    }

    /// Removes the wire feeding `input`, leaving it `Unknown`.
    ///
    /// # Errors
    /// Fails for unknown or non-input pins, or when propagation runs too
    /// deep.
    pub fn disconnect(&mut self, input: PinId) -> Result<(), PropagationError> {
        let previous = match &mut self.pin_mut(input)?.kind {
            PinKind::Input { line } => line.take(),
            PinKind::Output { .. } => return Err(GraphError::NotAnInput(input).into()),
        };
        if let Some(source) = previous {
            self.clear_slot(source, input)?;
            debug!("unwired {source:?} -> {input:?}");
        }
        self.write_input(input, Signal::Unknown, 0)
    }

    /// Tries each input of `gate` in port order and wires `output` into the
    /// first one within the capture radius of `point`.
    ///
    /// Returns `Ok(false)` when nothing is close enough.
    ///
    /// # Errors
    /// Fails when a handle is unknown or propagation runs too deep.
    pub fn catch(
        &mut self,
        gate: GateId,
        output: PinId,
        point: DVec2,
    ) -> Result<bool, PropagationError> {
        let record = self.gate(gate)?;
        if record.retired {
            return Ok(false);
        }
        let radius = self.config.capture_radius;
        let caught = record.inputs.iter().copied().find(|input| {
            self.pins
                .get(input.0)
                .is_some_and(|pin| pin.captures(record.position, point, radius))
        });
        match caught {
            Some(input) => {
                self.connect(output, input)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether `point` lies on the body of `gate`.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownGate`] for a foreign handle.
    pub fn hit_test(&self, gate: GateId, point: DVec2) -> Result<bool, GraphError> {
        let record = self.gate(gate)?;
        Ok(!record.retired && record.hit_test(point))
    }

    /// Output pin of `gate` under `point`, if any.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownGate`] for a foreign handle.
    pub fn hit_output(&self, gate: GateId, point: DVec2) -> Result<Option<PinId>, GraphError> {
        let record = self.gate(gate)?;
        if record.retired {
            return Ok(None);
        }
        let radius = self.config.capture_radius;
        Ok(record.outputs.iter().copied().find(|output| {
            self.pins
                .get(output.0)
                .is_some_and(|pin| pin.captures(record.position, point, radius))
        }))
    }

    /// Starts dragging a loose wire end out of `output`.
    ///
    /// # Errors
    /// Fails for unknown or non-output pins.
    pub fn begin_drag(&mut self, output: PinId, point: DVec2) -> Result<(), GraphError> {
        self.drag_state(output).map(|drag| *drag = WireDrag::Dragging { end: point })
    }

    /// Moves the loose end of a wire being dragged.
    ///
    /// # Errors
    /// Fails for unknown or non-output pins.
    pub fn drag_wire(&mut self, output: PinId, point: DVec2) -> Result<(), GraphError> {
        self.drag_state(output).map(|drag| {
            if let WireDrag::Dragging { end } = drag {
                *end = point;
            }
        })
    }

    /// Ends a drag and returns where the wire was dropped.
    ///
    /// # Errors
    /// Fails for unknown or non-output pins.
    pub fn release_wire(&mut self, output: PinId) -> Result<Option<DVec2>, GraphError> {
        self.drag_state(output)
            .map(|drag| match std::mem::take(drag) {
                WireDrag::Dragging { end } => Some(end),
                WireDrag::Committed => None,
            })
    }

    /// Disconnects every wire touching `gate` and marks it retired so its
    /// handle can no longer be wired or written.
    ///
    /// # Errors
    /// Fails when a handle is unknown or propagation runs too deep.
    pub fn retire_gate(&mut self, gate: GateId) -> Result<(), PropagationError> {
        let record = self.gate_mut(gate)?;
        if record.retired {
            return Ok(());
        }
        record.retired = true;
        let inputs = record.inputs.clone();
        let outputs = record.outputs.clone();
        for input in inputs {
            let previous = match &mut self.pin_mut(input)?.kind {
                PinKind::Input { line } => line.take(),
                PinKind::Output { .. } => None,
            };
            if let Some(source) = previous {
                self.clear_slot(source, input)?;
            }
        }
        for output in outputs {
            let targets: Vec<PinId> = match &mut self.pin_mut(output)?.kind {
                PinKind::Output { fan_out, drag } => {
                    *drag = WireDrag::Committed;
                    fan_out.iter_mut().filter_map(Option::take).collect()
                }
                PinKind::Input { .. } => Vec::new(),
            };
            for target in targets {
                if let PinKind::Input { line } = &mut self.pin_mut(target)?.kind {
                    *line = None;
                }
                self.write_input(target, Signal::Unknown, 0)?;
            }
        }
        debug!("retired gate {gate:?}");
        Ok(())
    }

    fn ensure_live_owner(&self, pin: PinId) -> Result<(), GraphError> {
        let owner = self.pin(pin)?.owner;
        if self.gate(owner)?.retired {
            return Err(GraphError::Retired(owner));
        }
        Ok(())
    }

    fn drag_state(&mut self, output: PinId) -> Result<&mut WireDrag, GraphError> {
        match &mut self.pin_mut(output)?.kind {
            PinKind::Output { drag, .. } => Ok(drag),
            PinKind::Input { .. } => Err(GraphError::NotAnOutput(output)),
        }
    }

    fn push_slot(&mut self, output: PinId, input: PinId) -> Result<(), GraphError> {
        match &mut self.pin_mut(output)?.kind {
            PinKind::Output { fan_out, .. } => {
                fan_out.push(Some(input));
                Ok(())
            }
            PinKind::Input { .. } => Err(GraphError::NotAnOutput(output)),
        }
    }

    fn clear_slot(&mut self, output: PinId, input: PinId) -> Result<(), GraphError> {
        if let PinKind::Output { fan_out, .. } = &mut self.pin_mut(output)?.kind {
            if let Some(slot) = fan_out.iter_mut().find(|slot| **slot == Some(input)) {
                *slot = None;
            }
        }
        Ok(())
    }

    fn write_input(
        &mut self,
        pin: PinId,
        value: Signal,
        depth: usize,
    ) -> Result<(), PropagationError> {
        let record = self.pin_mut(pin)?;
        if !record.is_input() {
            return Err(GraphError::NotAnInput(pin).into());
        }
        record.signal = value;
        let owner = record.owner;
        trace!("{pin:?} <- {value}");
        self.recompute(owner, depth + 1)
    }

    fn write_output(
        &mut self,
        pin: PinId,
        value: Signal,
        depth: usize,
    ) -> Result<(), PropagationError> {
        let record = self.pin_mut(pin)?;
        if !matches!(record.kind, PinKind::Output { .. }) {
            return Err(GraphError::NotAnOutput(pin).into());
        }
        if record.signal == value {
            return Ok(());
        }
        let targets: Vec<PinId> = record.targets().collect();
        record.signal = value;
        trace!("{pin:?} -> {value} into {} inputs", targets.len());
        for target in targets {
            self.write_input(target, value, depth)?;
        }
        Ok(())
    }

    fn recompute(&mut self, gate: GateId, depth: usize) -> Result<(), PropagationError> {
        let limit = self.config.max_depth;
        if depth > limit {
            return Err(PropagationError::DepthExceeded { limit });
        }
        let record = self
            .gates
            .get_mut(gate.0)
            .ok_or(GraphError::UnknownGate(gate))?;
        if record.retired {
            return Ok(());
        }
        let inputs: Vec<Signal> = record
            .inputs
            .iter()
            .map(|pin| self.pins.get(pin.0).map_or(Signal::Unknown, Pin::signal))
            .collect();
        let writes = transfer(record.kind, &inputs, &mut record.memory);
        let outputs = record.outputs.clone();
        for (pin, write) in outputs.into_iter().zip(writes) {
            if let Some(value) = write {
                self.write_output(pin, value, depth)?;
            }
        }
        Ok(())
    }
}
