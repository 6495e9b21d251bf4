//! Products carried down the conveyor.

use std::fmt;

use glam::DVec2;
use hashbrown::HashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::ItemId;
use crate::constants::{LAST_PRODUCT_DELAY, PRODUCT_SIZE};
use crate::geometry::Bounds;

/// Which attribute slot a [`Property`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Fill colour.
    Color,
    /// Outline shape.
    Shape,
    /// Picture printed on the product.
    Content,
}

/// A detectable attribute of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    /// No content.
    None,
    /// Red fill.
    Red,
    /// Green fill.
    Green,
    /// Blue fill.
    Blue,
    /// White fill.
    White,
    /// Square outline.
    Square,
    /// Circle outline.
    Circle,
    /// Diamond outline.
    Diamond,
    /// Izzo picture.
    Izzo,
    /// Smith picture.
    Smith,
    /// Football picture.
    Football,
    /// Basketball picture.
    Basketball,
}

static NAMES: Lazy<HashMap<&'static str, Property>> = Lazy::new(|| {
    Property::ALL
        .into_iter()
        .map(|property| (property.name(), property))
        .collect()
});

impl Property {
    /// Every property.
    pub const ALL: [Self; 12] = [
        Self::None,
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::White,
        Self::Square,
        Self::Circle,
        Self::Diamond,
        Self::Izzo,
        Self::Smith,
        Self::Football,
        Self::Basketball,
    ];

    /// Looks up a property by its level-document name.
    ///
    /// # Examples
    /// ```
    /// use sparty::items::Property;
    /// assert_eq!(Property::from_name("izzo"), Some(Property::Izzo));
    /// assert_eq!(Property::from_name("purple"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES.get(name).copied()
    }

    /// Level-document name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::White => "white",
            Self::Square => "square",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Izzo => "izzo",
            Self::Smith => "smith",
            Self::Football => "football",
            Self::Basketball => "basketball",
        }
    }

    /// Attribute slot.
    #[must_use]
    pub const fn kind(self) -> PropertyKind {
        match self {
            Self::Red | Self::Green | Self::Blue | Self::White => PropertyKind::Color,
            Self::Square | Self::Circle | Self::Diamond => PropertyKind::Shape,
            Self::None | Self::Izzo | Self::Smith | Self::Football | Self::Basketball => {
                PropertyKind::Content
            }
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a product leaving the beam, fed to the scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOutcome {
    /// Sparty kicked the product.
    pub kicked: bool,
    /// The level wanted the product kicked.
    pub wanted: bool,
}

/// A product riding a conveyor.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    position: DVec2,
    initial_position: DVec2,
    shape: Property,
    color: Property,
    content: Property,
    wants_kick: bool,
    conveyor: Option<ItemId>,
    kick_speed: Option<f64>,
    last: bool,
    last_countdown: Option<f64>,
}

impl Product {
    /// Creates a product at the origin.
    #[must_use]
    pub const fn new(shape: Property, color: Property, content: Property, wants_kick: bool) -> Self {
        Self {
            position: DVec2::ZERO,
            initial_position: DVec2::ZERO,
            shape,
            color,
            content,
            wants_kick,
            conveyor: None,
            kick_speed: None,
            last: false,
            last_countdown: None,
        }
    }

    /// Places the product and remembers the spot for resets.
    pub fn place(&mut self, position: DVec2) {
        self.position = position;
        self.initial_position = position;
    }

    /// Assigns the conveyor that moves this product.
    pub fn ride(&mut self, conveyor: ItemId) {
        self.conveyor = Some(conveyor);
    }

    /// Flags the final product of its conveyor.
    pub fn mark_last(&mut self) {
        self.last = true;
    }

    /// Centre.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Position restored by [`Product::reset_position`].
    #[must_use]
    pub const fn initial_position(&self) -> DVec2 {
        self.initial_position
    }

    /// Shape property.
    #[must_use]
    pub const fn shape(&self) -> Property {
        self.shape
    }

    /// Colour property.
    #[must_use]
    pub const fn color(&self) -> Property {
        self.color
    }

    /// Content property.
    #[must_use]
    pub const fn content(&self) -> Property {
        self.content
    }

    /// Colour, shape and content in that order.
    #[must_use]
    pub const fn properties(&self) -> [Property; 3] {
        [self.color, self.shape, self.content]
    }

    /// Whether the level wants this product kicked off the belt.
    #[must_use]
    pub const fn wants_kick(&self) -> bool {
        self.wants_kick
    }

    /// Conveyor carrying the product.
    #[must_use]
    pub const fn conveyor(&self) -> Option<ItemId> {
        self.conveyor
    }

    /// `true` once Sparty has kicked the product.
    #[must_use]
    pub const fn is_kicked(&self) -> bool {
        self.kick_speed.is_some()
    }

    /// `true` for the final product of a conveyor.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.last
    }

    /// Seconds left before the level completes, once the last product has
    /// left the beam.
    #[must_use]
    pub const fn last_countdown(&self) -> Option<f64> {
        self.last_countdown
    }

    /// Bounding box.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::centred(self.position, DVec2::splat(PRODUCT_SIZE))
    }

    /// Sends the product sideways at `speed` pixels per second.
    pub fn kick(&mut self, speed: f64) {
        self.kick_speed = Some(speed);
    }

    /// Moves the product with its belt and, if kicked, sideways.
    ///
    /// Returns `true` on the frame the last-product countdown runs out.
    pub fn advance(&mut self, belt_speed: f64, elapsed: f64) -> bool {
        self.position.y += belt_speed * elapsed;
        if let Some(speed) = self.kick_speed {
            self.position.x -= speed * elapsed;
        }
        let Some(remaining) = self.last_countdown else {
            return false;
        };
        let left = remaining - elapsed;
        if left <= 0.0 {
            self.last_countdown = None;
            true
        } else {
            self.last_countdown = Some(left);
            false
        }
    }

    /// Records that the product cleared the beam, starting the level-end
    /// countdown for the last product.
    pub fn leave_beam(&mut self) -> SortOutcome {
        if self.last {
            self.last_countdown = Some(LAST_PRODUCT_DELAY);
        }
        SortOutcome {
            kicked: self.is_kicked(),
            wanted: self.wants_kick,
        }
    }

    /// Returns the product to its load position and forgets any kick.
    pub fn reset_position(&mut self) {
        self.kick_speed = None;
        self.last_countdown = None;
        self.position = self.initial_position;
    }
}
