//! The owning container for a level's items and gate graph.
//!
//! Items sit in slots addressed by [`ItemId`]. A separate order list is both
//! the draw order (back to front) and the update order, so visitors see
//! items in z-order. Removing an item leaves its slot empty; handles are
//! never reused while the scene lives.

use glam::DVec2;
use log::debug;

use crate::constants::{DEFAULT_LEVEL_HEIGHT, DEFAULT_LEVEL_WIDTH};
use crate::items::{Item, ItemId};
use crate::logic::{GateGraph, GateId, GateKind, GraphConfig, PropagationError};
use crate::visitor::ItemVisitor;

/// Items of one level plus the graph their gates live in.
#[derive(Debug, Clone)]
pub struct Scene {
    slots: Vec<Option<Item>>,
    order: Vec<ItemId>,
    graph: GateGraph,
    size: DVec2,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

impl Scene {
    /// Empty scene of the default level size.
    #[must_use]
    pub const fn new(config: GraphConfig) -> Self {
        Self {
            slots: Vec::new(),
            order: Vec::new(),
            graph: GateGraph::new(config),
            size: DVec2::new(DEFAULT_LEVEL_WIDTH, DEFAULT_LEVEL_HEIGHT),
        }
    }

    /// Level width and height in virtual pixels.
    #[must_use]
    pub const fn size(&self) -> DVec2 {
        self.size
    }

    /// Sets the level size.
    pub fn set_size(&mut self, size: DVec2) {
        self.size = size;
    }

    /// Gate graph shared by every gate item.
    #[must_use]
    pub const fn graph(&self) -> &GateGraph {
        &self.graph
    }

    /// Mutable access to the gate graph.
    pub fn graph_mut(&mut self) -> &mut GateGraph {
        &mut self.graph
    }

    /// Appends `item` on top of the z-order.
    pub fn add(&mut self, item: Item) -> ItemId {
        let id = ItemId(self.slots.len());
        debug!("scene add {} {id:?}", item.kind_name());
        self.slots.push(Some(item));
        self.order.push(id);
        id
    }

    /// Creates a gate in the graph and a gate item on top of the z-order.
    pub fn add_gate(&mut self, kind: GateKind, position: DVec2) -> (ItemId, GateId) {
        let gate = self.graph.add_gate(kind, position);
        (self.add(Item::Gate(gate)), gate)
    }

    /// Looks up a live item.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Mutable lookup of a live item.
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Live item handles, back to front.
    #[must_use]
    pub fn order(&self) -> &[ItemId] {
        &self.order
    }

    /// Number of live items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` without live items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Live items, back to front.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (ItemId, &Item)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.get(*id).map(|item| (*id, item)))
    }

    /// The item that shows `gate`.
    #[must_use]
    pub fn gate_item(&self, gate: GateId) -> Option<ItemId> {
        self.iter()
            .find(|(_, item)| matches!(item, Item::Gate(shown) if *shown == gate))
            .map(|(id, _)| id)
    }

    /// Runs `visitor` over every live item in z-order.
    pub fn accept(&mut self, visitor: &mut dyn ItemVisitor) {
        let Self {
            slots,
            order,
            graph,
            ..
        } = self;
        for id in order.iter().copied() {
            if let Some(Some(item)) = slots.get_mut(id.0) {
                item.accept(id, graph, visitor);
            }
        }
    }

    /// Per-frame item housekeeping in z-order.
    pub fn update_items(&mut self, elapsed: f64) {
        let Self {
            slots,
            order,
            graph,
            ..
        } = self;
        for id in order.iter().copied() {
            if let Some(Some(item)) = slots.get_mut(id.0) {
                item.update(graph, elapsed);
            }
        }
    }

    /// Moves `id` to the top of the z-order. Returns `false` for a removed
    /// or unknown item.
    pub fn bring_to_front(&mut self, id: ItemId) -> bool {
        let Some(index) = self.order.iter().position(|entry| *entry == id) else {
            return false;
        };
        let moved = self.order.remove(index);
        self.order.push(moved);
        true
    }

    /// Moves every id in `ids` to the top of the z-order, keeping their
    /// relative order.
    pub fn bring_all_to_front(&mut self, ids: &[ItemId]) {
        for id in ids {
            self.bring_to_front(*id);
        }
    }

    /// Removes an item, retiring its gate or its bridge gates and their
    /// gate items so no wire or handle refers to them any more.
    ///
    /// # Errors
    /// Fails when disconnecting the removed gates propagates too deep. The
    /// item is removed regardless.
    pub fn remove(&mut self, id: ItemId) -> Result<Option<Item>, PropagationError> {
        let Some(item) = self.slots.get_mut(id.0).and_then(Option::take) else {
            return Ok(None);
        };
        self.order.retain(|entry| *entry != id);
        let mut gates = item.bridge_gates();
        if let Item::Gate(gate) = &item {
            gates.push(*gate);
        }
        let mut outcome = Ok(());
        for gate in gates {
            if let Some(shown) = self.gate_item(gate) {
                self.order.retain(|entry| *entry != shown);
                if let Some(slot) = self.slots.get_mut(shown.0) {
                    *slot = None;
                }
            }
            let retired = self.graph.retire_gate(gate);
            if outcome.is_ok() {
                outcome = retired;
            }
        }
        debug!("scene removed {} {id:?}", item.kind_name());
        outcome.map(|()| Some(item))
    }

    /// Drops every item and starts a fresh graph with the same
    /// configuration.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
        self.graph = GateGraph::new(self.graph.config());
    }
}
