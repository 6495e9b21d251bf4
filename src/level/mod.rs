//! Level documents: parsing, typed records and spawning into a scene.
//!
//! A level is read in two steps. [`parse_level`] turns the XML document
//! into a [`LevelDescription`] without touching any scene, so a bad file
//! never leaves a half-built level behind. [`spawn_level`] then builds the
//! items and their bridge gates.

mod parse;
mod source;
mod spawn;

use std::path::PathBuf;

use glam::DVec2;
use thiserror::Error;

pub use parse::parse_level;
pub use source::{load_file, FileLevelCatalog, LevelSource, SingleLevel};
pub use spawn::spawn_level;

use crate::items::{Property, SpartyConfig};
use crate::logic::{GateKind, GraphError};

/// Failures while reading or spawning a level.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The file could not be read.
    #[error("cannot read level file {path}: {source}")]
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The document is not well-formed XML.
    #[error("malformed level document: {0}")]
    Xml(#[from] roxmltree::Error),
    /// The root element is not `<level>`.
    #[error("expected a <level> root element, found <{0}>")]
    NotALevel(String),
    /// An attribute holds a value of the wrong shape.
    #[error("<{element}> attribute {attribute}=\"{value}\" is invalid")]
    BadAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: &'static str,
        /// Offending value.
        value: String,
    },
    /// A product or sensor names a property that does not exist.
    #[error("unknown product property '{0}'")]
    UnknownProperty(String),
    /// A level source has no level with this number.
    #[error("no level numbered {0}")]
    NoSuchLevel(u32),
    /// Building bridge gates failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// How far above its reference point a product starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductPlacement {
    /// Pixels above the conveyor's centre.
    Absolute(f64),
    /// Pixels above the previous product on the same conveyor.
    Stacked(f64),
}

/// A `<product>` inside a conveyor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductRecord {
    /// Vertical placement rule.
    pub placement: ProductPlacement,
    /// Shape property.
    pub shape: Property,
    /// Colour property.
    pub color: Property,
    /// Content property.
    pub content: Property,
    /// Whether the level wants it kicked.
    pub kick: bool,
}

/// A `<conveyor>` and the products it carries, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConveyorRecord {
    /// Centre of the belt.
    pub position: DVec2,
    /// Belt speed in pixels per second.
    pub speed: f64,
    /// Belt height.
    pub height: f64,
    /// Control panel offset.
    pub panel: DVec2,
    /// Products, front of the queue first.
    pub products: Vec<ProductRecord>,
}

/// A `<scoreboard>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreboardRecord {
    /// Top-left corner.
    pub position: DVec2,
    /// Points for a correctly sorted product.
    pub good: i32,
    /// Points for a wrongly sorted product.
    pub bad: i32,
    /// Goal text with `\n` line breaks.
    pub goal: String,
}

/// One entry of the `<items>` list.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemRecord {
    /// `<sparty>`.
    Sparty {
        /// Centre.
        position: DVec2,
        /// Kick configuration.
        config: SpartyConfig,
    },
    /// `<sensor>` with its outputs in document order.
    Sensor {
        /// Camera position.
        position: DVec2,
        /// Properties the sensor reports.
        outputs: Vec<Property>,
    },
    /// `<beam>`.
    Beam {
        /// Receiver position.
        position: DVec2,
        /// Horizontal offset of the sender.
        sender: f64,
    },
    /// `<conveyor>`.
    Conveyor(ConveyorRecord),
    /// `<scoreboard>`.
    Scoreboard(ScoreboardRecord),
    /// A pre-placed gate such as `<and>` or `<sr>`.
    Gate {
        /// Gate kind.
        kind: GateKind,
        /// Centre.
        position: DVec2,
    },
}

/// Everything a level document describes.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelDescription {
    /// Level width and height.
    pub size: DVec2,
    /// Items in document order, which becomes the initial z-order.
    pub items: Vec<ItemRecord>,
}
