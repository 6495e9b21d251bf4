//! Tri-state gate simulation.
//!
//! Gates and pins live in a [`GateGraph`] arena and refer to each other by
//! [`GateId`] and [`PinId`] handles. Writes propagate eagerly: setting an
//! input recomputes the owning gate, and an output that changes value pushes
//! the new value into every connected input. Propagation depth is bounded so
//! a feedback loop surfaces as [`PropagationError::DepthExceeded`].

mod catalog;
mod gate;
mod graph;
mod pin;
mod signal;

use thiserror::Error;

pub use catalog::{GateKind, GateSpec, PinSpec};
pub use gate::{transfer, Gate, GateMemory, OutputWrites};
pub use graph::{GateGraph, GraphConfig};
pub use pin::{Pin, PinKind, Placement, WireDrag};
pub use signal::Signal;

/// Handle of a gate inside a [`GateGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GateId(pub(crate) usize);

/// Handle of a pin inside a [`GateGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId(pub(crate) usize);

impl GateId {
    /// Position of the gate in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl PinId {
    /// Position of the pin in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Lookup failures for graph handles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The gate handle does not belong to this graph.
    #[error("unknown gate {0:?}")]
    UnknownGate(GateId),
    /// The pin handle does not belong to this graph.
    #[error("unknown pin {0:?}")]
    UnknownPin(PinId),
    /// An output pin was used where an input was required.
    #[error("pin {0:?} is not an input")]
    NotAnInput(PinId),
    /// An input pin was used where an output was required.
    #[error("pin {0:?} is not an output")]
    NotAnOutput(PinId),
    /// The gate has fewer ports than requested.
    #[error("gate {gate:?} has no port {port}")]
    NoSuchPort {
        /// Gate that was asked.
        gate: GateId,
        /// Requested port index.
        port: usize,
    },
    /// The gate was removed from the scene.
    #[error("gate {0:?} has been retired")]
    Retired(GateId),
}

/// Failures while pushing a value through the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropagationError {
    /// A chain of recomputations exceeded the configured limit, which
    /// usually means the wiring contains a feedback loop.
    #[error("propagation deeper than {limit} gates, wiring probably loops")]
    DepthExceeded {
        /// Configured maximum depth.
        limit: usize,
    },
    /// A handle lookup failed mid-propagation.
    #[error(transparent)]
    Graph(#[from] GraphError),
}
