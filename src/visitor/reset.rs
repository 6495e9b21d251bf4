//! One-shot product reset after a conveyor restart.

use super::ItemVisitor;
use crate::items::{Conveyor, ItemId, Product};

/// Returns products to their load positions when their conveyor has been
/// stopped and started again.
///
/// A conveyor that is started with its reset flag armed disarms the flag
/// and resets every product visited after it, up to the next conveyor.
#[derive(Debug, Default)]
pub struct ProductResetVisitor {
    active: bool,
    reset: Vec<ItemId>,
}

impl ProductResetVisitor {
    /// Fresh visitor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Products reset during the pass.
    #[must_use]
    pub fn reset_count(&self) -> usize {
        self.reset.len()
    }

    /// Whether `id` was returned to its load position during the pass.
    #[must_use]
    pub fn was_reset(&self, id: ItemId) -> bool {
        self.reset.contains(&id)
    }
}

impl ItemVisitor for ProductResetVisitor {
    fn visit_conveyor(&mut self, _id: ItemId, conveyor: &mut Conveyor) {
        self.active = conveyor.is_started() && conveyor.needs_reset();
        if self.active {
            conveyor.clear_reset();
        }
    }

    fn visit_product(&mut self, id: ItemId, product: &mut Product) {
        if self.active {
            product.reset_position();
            self.reset.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Item, Property};
    use crate::logic::GateGraph;
    use glam::DVec2;

    fn scene(started: bool, stopped_before: bool) -> Vec<Item> {
        let mut conveyor = Conveyor::new(DVec2::new(150.0, 400.0), 100.0, 800.0, DVec2::ZERO);
        if stopped_before {
            conveyor.stop();
        }
        if started {
            conveyor.start();
        }
        let mut product = Product::new(Property::Circle, Property::Blue, Property::None, false);
        product.place(DVec2::new(150.0, 300.0));
        product.kick(500.0);
        product.advance(100.0, 1.0);
        vec![Item::Conveyor(conveyor), Item::Product(product)]
    }

    fn run(items: &mut [Item]) -> ProductResetVisitor {
        let mut graph = GateGraph::default();
        let mut visitor = ProductResetVisitor::new();
        for (index, item) in items.iter_mut().enumerate() {
            item.accept(ItemId(index), &mut graph, &mut visitor);
        }
        visitor
    }

    fn pass(items: &mut [Item]) -> usize {
        run(items).reset_count()
    }

    #[test]
    fn restart_resets_once() {
        let mut items = scene(true, true);
        let visitor = run(&mut items);
        assert_eq!(visitor.reset_count(), 1);
        assert!(visitor.was_reset(ItemId(1)));
        assert!(!visitor.was_reset(ItemId(0)));
        let Some(Item::Product(product)) = items.get(1) else {
            panic!("expected a product");
        };
        assert_eq!(product.position(), DVec2::new(150.0, 300.0));
        assert!(!product.is_kicked());
        assert_eq!(pass(&mut items), 0);
    }

    #[test]
    fn first_start_does_not_reset() {
        let mut items = scene(true, false);
        assert_eq!(pass(&mut items), 0);
    }

    #[test]
    fn stopped_conveyor_keeps_products_in_place() {
        let mut items = scene(false, true);
        assert_eq!(pass(&mut items), 0);
    }
}
