//! Everything that can live in a level.
//!
//! [`Item`] is a closed set of kinds. Gates are stored in the scene's
//! [`GateGraph`] and referenced from [`Item::Gate`]; beams, sensors and
//! Sparty own bridge gates that sit in the scene as gate items too.

mod banner;
mod beam;
mod conveyor;
mod product;
mod scoreboard;
mod sensor;
mod sparty;

use log::warn;

pub use banner::Banner;
pub use beam::Beam;
pub use conveyor::{Conveyor, PanelAction};
pub use product::{Product, Property, PropertyKind, SortOutcome};
pub use scoreboard::Scoreboard;
pub use sensor::{Sensor, SensorOutput};
pub use sparty::{Sparty, SpartyConfig};

use crate::logic::{GateGraph, GateId, Signal};
use crate::visitor::ItemVisitor;

/// Handle of an item inside a [`Scene`](crate::scene::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) usize);

impl ItemId {
    /// Slot index in the scene.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One entry of the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// A product on a belt.
    Product(Product),
    /// A light beam.
    Beam(Beam),
    /// A camera sensor.
    Sensor(Sensor),
    /// The kicker.
    Sparty(Sparty),
    /// A conveyor belt.
    Conveyor(Conveyor),
    /// The scoreboard.
    Scoreboard(Scoreboard),
    /// A timed notice.
    Banner(Banner),
    /// A logic gate stored in the graph.
    Gate(GateId),
}

impl Item {
    /// Short name of the kind, used in logs.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Product(_) => "product",
            Self::Beam(_) => "beam",
            Self::Sensor(_) => "sensor",
            Self::Sparty(_) => "sparty",
            Self::Conveyor(_) => "conveyor",
            Self::Scoreboard(_) => "scoreboard",
            Self::Banner(_) => "banner",
            Self::Gate(_) => "gate",
        }
    }

    /// Bridge gates created for this item, which go away with it.
    #[must_use]
    pub fn bridge_gates(&self) -> Vec<GateId> {
        match self {
            Self::Beam(beam) => vec![beam.gate()],
            Self::Sparty(sparty) => vec![sparty.gate()],
            Self::Sensor(sensor) => sensor.outputs().iter().map(|output| output.gate).collect(),
            _ => Vec::new(),
        }
    }

    /// Dispatches `visitor` to the method for this item's kind.
    pub fn accept(&mut self, id: ItemId, graph: &mut GateGraph, visitor: &mut dyn ItemVisitor) {
        match self {
            Self::Product(product) => visitor.visit_product(id, product),
            Self::Beam(beam) => visitor.visit_beam(id, beam),
            Self::Sensor(sensor) => visitor.visit_sensor(id, sensor),
            Self::Sparty(sparty) => visitor.visit_sparty(id, sparty),
            Self::Conveyor(conveyor) => visitor.visit_conveyor(id, conveyor),
            Self::Scoreboard(scoreboard) => visitor.visit_scoreboard(id, scoreboard),
            Self::Banner(banner) => visitor.visit_banner(id, banner),
            Self::Gate(gate) => match graph.gate_mut(*gate) {
                Ok(record) => record.accept(visitor),
                Err(err) => warn!("item {id:?} skipped: {err}"),
            },
        }
    }

    /// Per-frame housekeeping. Product movement is driven by conveyors and
    /// happens separately.
    pub fn update(&mut self, graph: &GateGraph, elapsed: f64) {
        match self {
            Self::Sparty(sparty) => {
                let input = graph
                    .input_pin(sparty.gate(), 0)
                    .and_then(|pin| graph.state(pin))
                    .unwrap_or(Signal::Unknown);
                sparty.update(input, elapsed);
            }
            Self::Conveyor(conveyor) => conveyor.update(elapsed),
            Self::Banner(banner) => banner.update(elapsed),
            Self::Product(_)
            | Self::Beam(_)
            | Self::Sensor(_)
            | Self::Scoreboard(_)
            | Self::Gate(_) => {}
        }
    }
}
