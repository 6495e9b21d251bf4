//! Census of the scene by kind.

use super::ItemVisitor;
use crate::items::{Banner, Beam, Conveyor, ItemId, Product, Scoreboard, Sensor, Sparty};
use crate::logic::Gate;

/// Counts every kind it visits. Gates count once under their own kind and
/// once under [`ItemCounter::logic_gates`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ItemCounter {
    /// Products.
    pub products: usize,
    /// Beams.
    pub beams: usize,
    /// Sensors.
    pub sensors: usize,
    /// Sparty instances.
    pub sparties: usize,
    /// Conveyors.
    pub conveyors: usize,
    /// Scoreboards.
    pub scoreboards: usize,
    /// Banners.
    pub banners: usize,
    /// AND gates.
    pub and_gates: usize,
    /// OR gates.
    pub or_gates: usize,
    /// NOT gates.
    pub not_gates: usize,
    /// XOR gates.
    pub xor_gates: usize,
    /// SR latches.
    pub sr_gates: usize,
    /// D flip-flops.
    pub d_gates: usize,
    /// Input bridge gates.
    pub input_gates: usize,
    /// Output bridge gates.
    pub output_gates: usize,
    /// Gates of any kind.
    pub logic_gates: usize,
}

impl ItemVisitor for ItemCounter {
    fn visit_product(&mut self, _id: ItemId, _product: &mut Product) {
        self.products += 1;
    }

    fn visit_beam(&mut self, _id: ItemId, _beam: &mut Beam) {
        self.beams += 1;
    }

    fn visit_sensor(&mut self, _id: ItemId, _sensor: &mut Sensor) {
        self.sensors += 1;
    }

    fn visit_sparty(&mut self, _id: ItemId, _sparty: &mut Sparty) {
        self.sparties += 1;
    }

    fn visit_conveyor(&mut self, _id: ItemId, _conveyor: &mut Conveyor) {
        self.conveyors += 1;
    }

    fn visit_scoreboard(&mut self, _id: ItemId, _scoreboard: &mut Scoreboard) {
        self.scoreboards += 1;
    }

    fn visit_banner(&mut self, _id: ItemId, _banner: &mut Banner) {
        self.banners += 1;
    }

    fn visit_and_gate(&mut self, _gate: &mut Gate) {
        self.and_gates += 1;
    }

    fn visit_or_gate(&mut self, _gate: &mut Gate) {
        self.or_gates += 1;
    }

    fn visit_not_gate(&mut self, _gate: &mut Gate) {
        self.not_gates += 1;
    }

    fn visit_xor_gate(&mut self, _gate: &mut Gate) {
        self.xor_gates += 1;
    }

    fn visit_sr_gate(&mut self, _gate: &mut Gate) {
        self.sr_gates += 1;
    }

    fn visit_d_gate(&mut self, _gate: &mut Gate) {
        self.d_gates += 1;
    }

    fn visit_input_gate(&mut self, _gate: &mut Gate) {
        self.input_gates += 1;
    }

    fn visit_output_gate(&mut self, _gate: &mut Gate) {
        self.output_gates += 1;
    }

    fn visit_logic_gate(&mut self, _gate: &mut Gate) {
        self.logic_gates += 1;
    }
}
