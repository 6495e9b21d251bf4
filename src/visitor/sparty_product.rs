//! Kicks products that meet Sparty's boot.

use super::ItemVisitor;
use crate::items::{ItemId, Product, Sparty};

/// Kicks every product crossing the kick line of the most recently visited
/// Sparty while that Sparty is mid-kick.
#[derive(Debug, Default)]
pub struct SpartyProductVisitor {
    current: Option<Sparty>,
    kicked: usize,
}

impl SpartyProductVisitor {
    /// Fresh visitor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Products kicked during the pass.
    #[must_use]
    pub const fn kicked(&self) -> usize {
        self.kicked
    }
}

impl ItemVisitor for SpartyProductVisitor {
    fn visit_sparty(&mut self, _id: ItemId, sparty: &mut Sparty) {
        self.current = Some(sparty.clone());
    }

    fn visit_product(&mut self, id: ItemId, product: &mut Product) {
        let Some(sparty) = &self.current else {
            return;
        };
        if sparty.is_kicking() && sparty.in_kick_range(product) {
            if !product.is_kicked() {
                log::debug!("sparty kicked product {id:?}");
                self.kicked += 1;
            }
            product.kick(sparty.config().kick_speed);
        }
    }
}
