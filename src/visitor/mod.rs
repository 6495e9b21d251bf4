//! Operations over the scene without downcasting.
//!
//! [`ItemVisitor`] has one method per concrete item kind and per gate kind,
//! all defaulting to no-ops, so a visitor only implements what it cares
//! about. Every gate additionally reaches [`ItemVisitor::visit_logic_gate`]
//! after its kind-specific method, which lets a visitor treat all gates
//! alike.
//!
//! Visitors are stateful across one pass. A container visit (a beam, a
//! sensor, Sparty, a conveyor) sets the target that subsequent product
//! visits act on, so traversal order is the scene's z-order.

mod conveyor;
mod counter;
mod detection;
mod reset;
mod score;
mod sparty_product;
mod toggle;

pub use conveyor::{ConveyorControlVisitor, ConveyorProductMoveVisitor, StopConveyorVisitor};
pub use counter::ItemCounter;
pub use detection::{BeamDetection, BeamDetectionVisitor, BeamReading, SensorDetectionVisitor, SensorReading};
pub use reset::ProductResetVisitor;
pub use score::{ScoreUpdateVisitor, ScoreboardVisitor};
pub use sparty_product::SpartyProductVisitor;
pub use toggle::ToggleControlPointsVisitor;

use crate::items::{Banner, Beam, Conveyor, ItemId, Product, Scoreboard, Sensor, Sparty};
use crate::logic::Gate;

/// Double-dispatch target for [`Item::accept`](crate::items::Item::accept).
pub trait ItemVisitor {
    /// Visits a product.
    fn visit_product(&mut self, _id: ItemId, _product: &mut Product) {}
    /// Visits a beam.
    fn visit_beam(&mut self, _id: ItemId, _beam: &mut Beam) {}
    /// Visits a sensor.
    fn visit_sensor(&mut self, _id: ItemId, _sensor: &mut Sensor) {}
    /// Visits Sparty.
    fn visit_sparty(&mut self, _id: ItemId, _sparty: &mut Sparty) {}
    /// Visits a conveyor.
    fn visit_conveyor(&mut self, _id: ItemId, _conveyor: &mut Conveyor) {}
    /// Visits the scoreboard.
    fn visit_scoreboard(&mut self, _id: ItemId, _scoreboard: &mut Scoreboard) {}
    /// Visits a banner.
    fn visit_banner(&mut self, _id: ItemId, _banner: &mut Banner) {}
    /// Visits an AND gate.
    fn visit_and_gate(&mut self, _gate: &mut Gate) {}
    /// Visits an OR gate.
    fn visit_or_gate(&mut self, _gate: &mut Gate) {}
    /// Visits a NOT gate.
    fn visit_not_gate(&mut self, _gate: &mut Gate) {}
    /// Visits an XOR gate.
    fn visit_xor_gate(&mut self, _gate: &mut Gate) {}
    /// Visits an SR latch.
    fn visit_sr_gate(&mut self, _gate: &mut Gate) {}
    /// Visits a D flip-flop.
    fn visit_d_gate(&mut self, _gate: &mut Gate) {}
    /// Visits an input bridge gate.
    fn visit_input_gate(&mut self, _gate: &mut Gate) {}
    /// Visits an output bridge gate.
    fn visit_output_gate(&mut self, _gate: &mut Gate) {}
    /// Visits any gate, after its kind-specific method.
    fn visit_logic_gate(&mut self, _gate: &mut Gate) {}
}
