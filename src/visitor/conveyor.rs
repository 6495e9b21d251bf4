//! Conveyor driven visitors: belt movement, panel clicks and stopping.

use glam::DVec2;
use hashbrown::HashMap;

use super::ItemVisitor;
use crate::items::{Conveyor, ItemId, PanelAction, Product};

/// Moves products riding started conveyors.
///
/// Conveyors must be visited before their products, which holds for the
/// scene's z-order because products are spawned after their conveyor and
/// only ever move forward.
#[derive(Debug)]
pub struct ConveyorProductMoveVisitor {
    elapsed: f64,
    speeds: HashMap<ItemId, f64>,
    moved: Vec<ItemId>,
    level_complete: bool,
}

impl ConveyorProductMoveVisitor {
    /// Visitor advancing products by `elapsed` seconds.
    #[must_use]
    pub fn new(elapsed: f64) -> Self {
        Self {
            elapsed,
            speeds: HashMap::new(),
            moved: Vec::new(),
            level_complete: false,
        }
    }

    /// Products that moved, in visit order.
    #[must_use]
    pub fn moved(&self) -> &[ItemId] {
        &self.moved
    }

    /// `true` when the last product's countdown ran out during the pass.
    #[must_use]
    pub const fn level_complete(&self) -> bool {
        self.level_complete
    }
}

impl ItemVisitor for ConveyorProductMoveVisitor {
    fn visit_conveyor(&mut self, id: ItemId, conveyor: &mut Conveyor) {
        if conveyor.is_started() {
            self.speeds.insert(id, conveyor.speed());
        }
    }

    fn visit_product(&mut self, id: ItemId, product: &mut Product) {
        let Some(speed) = product
            .conveyor()
            .and_then(|conveyor| self.speeds.get(&conveyor).copied())
        else {
            return;
        };
        if product.advance(speed, self.elapsed) {
            log::info!("last product cleared, level complete");
            self.level_complete = true;
        }
        self.moved.push(id);
    }
}

/// Forwards a click to the first conveyor panel that reacts to it.
#[derive(Debug)]
pub struct ConveyorControlVisitor {
    point: DVec2,
    action: Option<(ItemId, PanelAction)>,
}

impl ConveyorControlVisitor {
    /// Visitor for a click at `point` in level space.
    #[must_use]
    pub const fn new(point: DVec2) -> Self {
        Self {
            point,
            action: None,
        }
    }

    /// The conveyor that handled the click and what it did.
    #[must_use]
    pub const fn action(&self) -> Option<(ItemId, PanelAction)> {
        self.action
    }
}

impl ItemVisitor for ConveyorControlVisitor {
    fn visit_conveyor(&mut self, id: ItemId, conveyor: &mut Conveyor) {
        if self.action.is_none() {
            self.action = conveyor.click(self.point).map(|action| (id, action));
        }
    }
}

/// Stops every conveyor.
#[derive(Debug, Default)]
pub struct StopConveyorVisitor;

impl ItemVisitor for StopConveyorVisitor {
    fn visit_conveyor(&mut self, _id: ItemId, conveyor: &mut Conveyor) {
        if conveyor.is_started() {
            conveyor.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Item, Property};
    use crate::logic::GateGraph;
    use approx::assert_relative_eq;

    fn belt(started: bool) -> Vec<Item> {
        let mut conveyor = Conveyor::new(DVec2::new(150.0, 400.0), 100.0, 800.0, DVec2::ZERO);
        if started {
            conveyor.start();
        }
        let mut product = Product::new(Property::Square, Property::Red, Property::None, false);
        product.place(DVec2::new(150.0, 100.0));
        product.ride(ItemId(0));
        vec![Item::Conveyor(conveyor), Item::Product(product)]
    }

    fn visit(items: &mut [Item], visitor: &mut dyn ItemVisitor) {
        let mut graph = GateGraph::default();
        for (index, item) in items.iter_mut().enumerate() {
            item.accept(ItemId(index), &mut graph, visitor);
        }
    }

    fn product_y(items: &[Item]) -> f64 {
        match items.get(1) {
            Some(Item::Product(product)) => product.position().y,
            _ => f64::NAN,
        }
    }

    #[test]
    fn started_belts_carry_their_products() {
        let mut items = belt(true);
        let mut visitor = ConveyorProductMoveVisitor::new(0.5);
        visit(&mut items, &mut visitor);
        assert_eq!(visitor.moved(), &[ItemId(1)]);
        assert!(!visitor.level_complete());
        assert_relative_eq!(product_y(&items), 150.0);
    }

    #[test]
    fn stopped_belts_leave_products_alone() {
        let mut items = belt(false);
        let mut visitor = ConveyorProductMoveVisitor::new(0.5);
        visit(&mut items, &mut visitor);
        assert!(visitor.moved().is_empty());
        assert_relative_eq!(product_y(&items), 100.0);
    }

    #[test]
    fn click_and_stop() {
        let mut items = belt(false);
        let mut control = ConveyorControlVisitor::new(DVec2::new(190.0, 430.0));
        visit(&mut items, &mut control);
        assert_eq!(control.action(), Some((ItemId(0), PanelAction::Started)));
        visit(&mut items, &mut StopConveyorVisitor);
        let Some(Item::Conveyor(conveyor)) = items.first() else {
            panic!("expected a conveyor");
        };
        assert!(!conveyor.is_started());
        assert!(conveyor.needs_reset());
    }
}
