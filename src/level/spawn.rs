//! Builds scene items from a [`LevelDescription`].

use glam::DVec2;
use log::info;

use super::{ConveyorRecord, ItemRecord, LevelDescription, LevelError, ProductPlacement};
use crate::items::{Beam, Conveyor, Item, Product, Scoreboard, Sensor, SensorOutput, Sparty};
use crate::logic::GateKind;
use crate::scene::Scene;

/// Adds every item of `level` to `scene` in document order and sets the
/// scene size.
///
/// Bridge gates are added just before the item that owns them. Products
/// follow their conveyor, so the conveyor is always visited first.
///
/// # Errors
/// Fails when a bridge gate's pin cannot be resolved in the scene's graph.
pub fn spawn_level(scene: &mut Scene, level: &LevelDescription) -> Result<(), LevelError> {
    scene.set_size(level.size);
    for record in &level.items {
        match record {
            ItemRecord::Sparty { position, config } => {
                let (_, gate) = scene.add_gate(GateKind::Input, config.pin);
                let graph = scene.graph_mut();
                let pin = graph.input_pin(gate, 0)?;
                graph.anchor_pin(pin, config.pin)?;
                scene.add(Item::Sparty(Sparty::new(*position, *config, gate)));
            }
            ItemRecord::Sensor { position, outputs } => {
                let wired = outputs
                    .iter()
                    .enumerate()
                    .map(|(index, property)| {
                        let at = Sensor::pin_location(*position, index);
                        let (_, gate) = scene.add_gate(GateKind::Output, at);
                        SensorOutput {
                            property: *property,
                            gate,
                        }
                    })
                    .collect();
                scene.add(Item::Sensor(Sensor::new(*position, wired)));
            }
            ItemRecord::Beam { position, sender } => {
                let (_, gate) = scene.add_gate(GateKind::Output, Beam::pin_location(*position));
                scene.add(Item::Beam(Beam::new(*position, *sender, gate)));
            }
            ItemRecord::Conveyor(conveyor) => spawn_conveyor(scene, conveyor),
            ItemRecord::Scoreboard(record) => {
                scene.add(Item::Scoreboard(Scoreboard::new(
                    record.position,
                    record.good,
                    record.bad,
                    record.goal.clone(),
                )));
            }
            ItemRecord::Gate { kind, position } => {
                scene.add_gate(*kind, *position);
            }
        }
    }
    info!(
        "spawned {} items on a {}x{} level",
        scene.len(),
        level.size.x,
        level.size.y
    );
    Ok(())
}

fn spawn_conveyor(scene: &mut Scene, record: &ConveyorRecord) {
    let conveyor = scene.add(Item::Conveyor(Conveyor::new(
        record.position,
        record.speed,
        record.height,
        record.panel,
    )));
    let mut last_y = record.position.y;
    let count = record.products.len();
    for (index, entry) in record.products.iter().enumerate() {
        last_y = match entry.placement {
            ProductPlacement::Stacked(offset) => last_y - offset,
            ProductPlacement::Absolute(offset) => record.position.y - offset,
        };
        let mut product = Product::new(entry.shape, entry.color, entry.content, entry.kick);
        product.place(DVec2::new(record.position.x, last_y));
        product.ride(conveyor);
        if index + 1 == count {
            product.mark_last();
        }
        scene.add(Item::Product(product));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::parse_level;
    use crate::logic::{Placement, Signal};
    use crate::visitor::ItemCounter;

    const LEVEL: &str = r#"<level size="1150,800"><items>
        <sparty x="345" y="390" height="300" pin="800,500" kick-duration="0.25" kick-speed="1000"/>
        <sensor x="150" y="450"><red/><green/></sensor>
        <beam x="242" y="437" sender="-185"/>
        <conveyor x="150" y="400" speed="100" height="800">
            <product placement="100"/>
            <product placement="+200"/>
        </conveyor>
        <scoreboard x="700" y="40">Goal</scoreboard>
    </items></level>"#;

    fn spawned() -> Scene {
        let mut scene = Scene::default();
        spawn_level(&mut scene, &parse_level(LEVEL).unwrap()).unwrap();
        scene
    }

    #[test]
    fn every_record_becomes_an_item() {
        let mut scene = spawned();
        let mut counter = ItemCounter::default();
        scene.accept(&mut counter);
        assert_eq!(counter.sparties, 1);
        assert_eq!(counter.sensors, 1);
        assert_eq!(counter.beams, 1);
        assert_eq!(counter.conveyors, 1);
        assert_eq!(counter.products, 2);
        assert_eq!(counter.scoreboards, 1);
        assert_eq!((counter.input_gates, counter.output_gates), (1, 3));
    }

    #[test]
    fn products_stack_above_the_conveyor() {
        let scene = spawned();
        let products: Vec<&Product> = scene
            .iter()
            .filter_map(|(_, item)| match item {
                Item::Product(product) => Some(product),
                _ => None,
            })
            .collect();
        let ys: Vec<f64> = products.iter().map(|p| p.position().y).collect();
        assert_eq!(ys, vec![300.0, 100.0]);
        assert_eq!(
            products.iter().map(|p| p.is_last()).collect::<Vec<_>>(),
            vec![false, true]
        );
        assert!(products.iter().all(|p| p.conveyor().is_some()));
    }

    #[test]
    fn bridge_gates_sit_on_their_pins() {
        let scene = spawned();
        let graph = scene.graph();
        let sparty_gate = scene
            .iter()
            .find_map(|(_, item)| match item {
                Item::Sparty(sparty) => Some(sparty.gate()),
                _ => None,
            })
            .unwrap();
        let pin = graph.input_pin(sparty_gate, 0).unwrap();
        assert_eq!(
            graph.pin(pin).unwrap().placement(),
            Placement::Anchored(DVec2::new(800.0, 500.0))
        );
        let beam_gate = scene
            .iter()
            .find_map(|(_, item)| match item {
                Item::Beam(beam) => Some(beam.gate()),
                _ => None,
            })
            .unwrap();
        let out = graph.output_pin(beam_gate, 0).unwrap();
        assert_eq!(graph.pin_location(out), Ok(DVec2::new(322.0, 437.0)));
        assert_eq!(graph.state(out), Ok(Signal::Zero));
    }
}
