//! XML to [`LevelDescription`].

use std::str::FromStr;

use glam::DVec2;
use log::debug;
use roxmltree::{Document, Node};

use super::{
    ConveyorRecord, ItemRecord, LevelDescription, LevelError, ProductPlacement, ProductRecord,
    ScoreboardRecord,
};
use crate::constants::{DEFAULT_BAD_SCORE, DEFAULT_GOOD_SCORE, DEFAULT_LEVEL_HEIGHT, DEFAULT_LEVEL_WIDTH};
use crate::items::{Property, SpartyConfig};
use crate::logic::GateKind;

/// Parses a level document.
///
/// Elements other than those the game knows are skipped. Missing
/// attributes take their documented defaults; present but malformed ones
/// are errors.
///
/// # Errors
/// Returns [`LevelError`] for malformed XML, a root other than `<level>`,
/// unparsable attributes and unknown product properties.
///
/// # Examples
/// ```
/// use sparty::level::{parse_level, ItemRecord};
/// let level = parse_level(r#"<level><items><beam x="242" y="437" sender="-185"/></items></level>"#)?;
/// assert_eq!(level.size.x, 1150.0);
/// assert!(matches!(level.items.as_slice(), [ItemRecord::Beam { sender, .. }] if *sender == -185.0));
/// # Ok::<(), sparty::level::LevelError>(())
/// ```
pub fn parse_level(text: &str) -> Result<LevelDescription, LevelError> {
    let document = Document::parse(text)?;
    let root = document.root_element();
    if !root.has_tag_name("level") {
        return Err(LevelError::NotALevel(root.tag_name().name().to_owned()));
    }
    let size = pair(
        root,
        "size",
        DVec2::new(DEFAULT_LEVEL_WIDTH, DEFAULT_LEVEL_HEIGHT),
    )?;
    let mut items = Vec::new();
    for list in root.children().filter(|node| node.has_tag_name("items")) {
        for node in list.children().filter(Node::is_element) {
            if let Some(record) = item(node)? {
                items.push(record);
            }
        }
    }
    Ok(LevelDescription { size, items })
}

fn item(node: Node) -> Result<Option<ItemRecord>, LevelError> {
    let name = node.tag_name().name();
    let record = match name {
        "sparty" => sparty(node)?,
        "sensor" => sensor(node)?,
        "beam" => ItemRecord::Beam {
            position: position(node)?,
            sender: number(node, "sender", 0.0)?,
        },
        "conveyor" => ItemRecord::Conveyor(conveyor(node)?),
        "scoreboard" => ItemRecord::Scoreboard(scoreboard(node)?),
        other => match GateKind::from_name(other).filter(|kind| !kind.is_bridge()) {
            Some(kind) => ItemRecord::Gate {
                kind,
                position: position(node)?,
            },
            None => {
                debug!("skipping unknown level element <{other}>");
                return Ok(None);
            }
        },
    };
    Ok(Some(record))
}

fn sparty(node: Node) -> Result<ItemRecord, LevelError> {
    Ok(ItemRecord::Sparty {
        position: position(node)?,
        config: SpartyConfig {
            height: number(node, "height", 0.0)?,
            pin: pair(node, "pin", DVec2::ZERO)?,
            kick_duration: number(node, "kick-duration", 0.0)?,
            kick_speed: number(node, "kick-speed", 0.0)?,
        },
    })
}

fn sensor(node: Node) -> Result<ItemRecord, LevelError> {
    let outputs = node
        .children()
        .filter(Node::is_element)
        .map(|child| property(child.tag_name().name()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ItemRecord::Sensor {
        position: position(node)?,
        outputs,
    })
}

fn conveyor(node: Node) -> Result<ConveyorRecord, LevelError> {
    let products = node
        .children()
        .filter(|child| child.has_tag_name("product"))
        .map(product)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ConveyorRecord {
        position: position(node)?,
        speed: number(node, "speed", 0.0)?,
        height: number(node, "height", 0.0)?,
        panel: pair(node, "panel", DVec2::ZERO)?,
        products,
    })
}

fn product(node: Node) -> Result<ProductRecord, LevelError> {
    let raw = node.attribute("placement").unwrap_or("0").trim();
    let offset = raw
        .strip_prefix('+')
        .unwrap_or(raw)
        .parse::<f64>()
        .map_err(|_| bad_attribute(node, "placement", raw))?;
    let placement = if raw.starts_with('+') {
        ProductPlacement::Stacked(offset)
    } else {
        ProductPlacement::Absolute(offset)
    };
    Ok(ProductRecord {
        placement,
        shape: property(node.attribute("shape").unwrap_or("square"))?,
        color: property(node.attribute("color").unwrap_or("red"))?,
        content: property(node.attribute("content").unwrap_or("none"))?,
        kick: node.attribute("kick").unwrap_or("no") == "yes",
    })
}

fn scoreboard(node: Node) -> Result<ScoreboardRecord, LevelError> {
    let mut goal = String::new();
    for child in node.children() {
        if child.is_text() {
            goal.push_str(child.text().unwrap_or_default().trim());
        } else if child.has_tag_name("br") {
            goal.push('\n');
        }
    }
    Ok(ScoreboardRecord {
        position: position(node)?,
        good: number(node, "good", DEFAULT_GOOD_SCORE)?,
        bad: number(node, "bad", DEFAULT_BAD_SCORE)?,
        goal,
    })
}

fn property(name: &str) -> Result<Property, LevelError> {
    Property::from_name(name).ok_or_else(|| LevelError::UnknownProperty(name.to_owned()))
}

fn bad_attribute(node: Node, attribute: &'static str, value: &str) -> LevelError {
    LevelError::BadAttribute {
        element: node.tag_name().name().to_owned(),
        attribute,
        value: value.to_owned(),
    }
}

fn number<T: FromStr>(node: Node, attribute: &'static str, default: T) -> Result<T, LevelError> {
    node.attribute(attribute).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|_| bad_attribute(node, attribute, raw))
    })
}

fn position(node: Node) -> Result<DVec2, LevelError> {
    Ok(DVec2::new(number(node, "x", 0.0)?, number(node, "y", 0.0)?))
}

/// Reads an `"x,y"` attribute.
fn pair(node: Node, attribute: &'static str, default: DVec2) -> Result<DVec2, LevelError> {
    let Some(raw) = node.attribute(attribute) else {
        return Ok(default);
    };
    let parsed = raw.split_once(',').and_then(|(x, y)| {
        let px = x.trim().parse::<f64>().ok()?;
        let py = y.trim().parse::<f64>().ok()?;
        Some(DVec2::new(px, py))
    });
    parsed.ok_or_else(|| bad_attribute(node, attribute, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const CONVEYOR: &str = r#"<level size="1200,900"><items>
        <conveyor x="150" y="400" speed="100" height="800" panel="60,-390">
            <product placement="0" shape="circle" color="green" kick="yes"/>
            <product placement="+250" content="izzo"/>
            <product placement="300"/>
        </conveyor>
    </items></level>"#;

    fn only_item(text: &str) -> ItemRecord {
        let level = parse_level(text).unwrap();
        assert_eq!(level.items.len(), 1);
        level.items.into_iter().next().unwrap()
    }

    #[test]
    fn conveyor_products_keep_document_order() {
        let level = parse_level(CONVEYOR).unwrap();
        assert_eq!(level.size, DVec2::new(1200.0, 900.0));
        let [ItemRecord::Conveyor(conveyor)] = level.items.as_slice() else {
            panic!("expected one conveyor, got {:?}", level.items);
        };
        assert_eq!(conveyor.panel, DVec2::new(60.0, -390.0));
        let placements: Vec<_> = conveyor.products.iter().map(|p| p.placement).collect();
        assert_eq!(
            placements,
            vec![
                ProductPlacement::Absolute(0.0),
                ProductPlacement::Stacked(250.0),
                ProductPlacement::Absolute(300.0),
            ]
        );
        let first = conveyor.products[0];
        assert_eq!((first.shape, first.color, first.content), (Property::Circle, Property::Green, Property::None));
        assert!(first.kick);
        let second = conveyor.products[1];
        assert_eq!((second.shape, second.color, second.content), (Property::Square, Property::Red, Property::Izzo));
        assert!(!second.kick);
    }

    #[test]
    fn scoreboard_goal_breaks_lines() {
        let record = only_item(
            r#"<level><items><scoreboard x="700" y="40" good="10" bad="-5">
                Kick all red products<br/>Keep the others
            </scoreboard></items></level>"#,
        );
        assert_eq!(
            record,
            ItemRecord::Scoreboard(ScoreboardRecord {
                position: DVec2::new(700.0, 40.0),
                good: 10,
                bad: -5,
                goal: "Kick all red products\nKeep the others".to_owned(),
            })
        );
    }

    #[test]
    fn sensor_outputs_follow_child_names() {
        let record = only_item(
            r#"<level><items><sensor x="150" y="450"><red/><izzo/><circle/></sensor></items></level>"#,
        );
        assert_eq!(
            record,
            ItemRecord::Sensor {
                position: DVec2::new(150.0, 450.0),
                outputs: vec![Property::Red, Property::Izzo, Property::Circle],
            }
        );
    }

    #[test]
    fn sparty_reads_pin_and_kick() {
        let record = only_item(
            r#"<level><items><sparty x="345" y="390" height="300" pin="800,500" kick-duration="0.25" kick-speed="1000"/></items></level>"#,
        );
        let ItemRecord::Sparty { config, .. } = record else {
            panic!("expected sparty");
        };
        assert_eq!(config.pin, DVec2::new(800.0, 500.0));
        assert_eq!(config.kick_duration, 0.25);
    }

    #[test]
    fn placed_gates_and_unknown_elements() {
        let level = parse_level(
            r#"<level><items><sr x="500" y="300"/><teapot/><output x="1" y="1"/></items></level>"#,
        )
        .unwrap();
        assert_eq!(
            level.items,
            vec![ItemRecord::Gate {
                kind: GateKind::Sr,
                position: DVec2::new(500.0, 300.0),
            }]
        );
    }

    #[rstest]
    #[case(r#"<level><items><sensor><purple/></sensor></items></level>"#)]
    #[case(r#"<level><items><conveyor><product shape="hexagon"/></conveyor></items></level>"#)]
    fn unknown_properties_fail(#[case] text: &str) {
        assert!(matches!(parse_level(text), Err(LevelError::UnknownProperty(_))));
    }

    #[rstest]
    #[case(r#"<level size="wide"/>"#)]
    #[case(r#"<level><items><beam x="left"/></items></level>"#)]
    #[case(r#"<level><items><conveyor><product placement="+x"/></conveyor></items></level>"#)]
    fn malformed_attributes_fail(#[case] text: &str) {
        assert!(matches!(parse_level(text), Err(LevelError::BadAttribute { .. })));
    }

    #[rstest]
    #[case("<level><items>")]
    #[case("<game/>")]
    fn broken_documents_fail(#[case] text: &str) {
        assert!(parse_level(text).is_err());
    }
}
