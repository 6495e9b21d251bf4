//! Visitors that turn product geometry into bridge-gate signals.
//!
//! Both visitors only read the scene. They collect readings during the pass
//! and the caller writes them into the graph afterwards, so no visitor holds
//! the graph while items are borrowed.

use super::ItemVisitor;
use crate::items::{Beam, ItemId, Product, Property, Sensor};
use crate::logic::{GateId, Signal};

/// Detection state of one beam after a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeamReading {
    /// The beam item.
    pub beam: ItemId,
    /// Its output bridge gate.
    pub gate: GateId,
    /// Whether any product crossed it.
    pub detected: bool,
}

impl BeamReading {
    /// Value to write into the bridge gate's output pin.
    #[must_use]
    pub const fn signal(&self) -> Signal {
        Signal::from_bool(self.detected)
    }
}

/// Result of a [`BeamDetectionVisitor`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeamDetection {
    /// One reading per visited beam, in visit order.
    pub readings: Vec<BeamReading>,
    /// Last product found crossing a beam.
    pub hit: Option<ItemId>,
}

impl BeamDetection {
    /// `true` when any beam saw a product.
    #[must_use]
    pub fn any_detected(&self) -> bool {
        self.readings.iter().any(|reading| reading.detected)
    }
}

/// Checks which products cross each beam.
///
/// A beam visit opens a reading; every product visited after it is tested
/// against that beam until the next beam.
#[derive(Debug, Default)]
pub struct BeamDetectionVisitor {
    current: Option<Beam>,
    detection: BeamDetection,
}

impl BeamDetectionVisitor {
    /// Fresh visitor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends the pass.
    #[must_use]
    pub fn finish(self) -> BeamDetection {
        self.detection
    }
}

impl ItemVisitor for BeamDetectionVisitor {
    fn visit_beam(&mut self, id: ItemId, beam: &mut Beam) {
        self.current = Some(beam.clone());
        self.detection.readings.push(BeamReading {
            beam: id,
            gate: beam.gate(),
            detected: false,
        });
    }

    fn visit_product(&mut self, id: ItemId, product: &mut Product) {
        let Some(beam) = &self.current else {
            return;
        };
        if !beam.crosses(&product.bounds()) {
            return;
        }
        if let Some(reading) = self.detection.readings.last_mut() {
            reading.detected = true;
        }
        self.detection.hit = Some(id);
    }
}

/// Output values one sensor should publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorReading {
    /// The sensor item.
    pub sensor: ItemId,
    /// `(bridge gate, value)` for every output of the sensor.
    pub writes: Vec<(GateId, Signal)>,
}

#[derive(Debug)]
struct OpenSensor {
    id: ItemId,
    sensor: Sensor,
    seen: Vec<Property>,
}

impl OpenSensor {
    fn close(self) -> SensorReading {
        SensorReading {
            sensor: self.id,
            writes: self.sensor.output_states(&self.seen).collect(),
        }
    }
}

/// Collects the properties in view of each sensor.
///
/// Outputs whose property any in-range product shows read One, all others
/// Zero, so a sensor with nothing in view clears every output.
#[derive(Debug, Default)]
pub struct SensorDetectionVisitor {
    open: Option<OpenSensor>,
    readings: Vec<SensorReading>,
}

impl SensorDetectionVisitor {
    /// Fresh visitor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends the pass.
    #[must_use]
    pub fn finish(mut self) -> Vec<SensorReading> {
        if let Some(open) = self.open.take() {
            self.readings.push(open.close());
        }
        self.readings
    }
}

impl ItemVisitor for SensorDetectionVisitor {
    fn visit_sensor(&mut self, id: ItemId, sensor: &mut Sensor) {
        if let Some(open) = self.open.take() {
            self.readings.push(open.close());
        }
        self.open = Some(OpenSensor {
            id,
            sensor: sensor.clone(),
            seen: Vec::new(),
        });
    }

    fn visit_product(&mut self, _id: ItemId, product: &mut Product) {
        let Some(open) = &mut self.open else {
            return;
        };
        if open.sensor.in_range(product) {
            for property in product.properties() {
                if !open.seen.contains(&property) {
                    open.seen.push(property);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Item, SensorOutput};
    use crate::logic::GateGraph;
    use glam::DVec2;
    use rstest::rstest;

    fn product(x: f64, y: f64, color: Property) -> Item {
        let mut product = Product::new(Property::Square, color, Property::None, false);
        product.place(DVec2::new(x, y));
        Item::Product(product)
    }

    fn run(items: &mut [Item], visitor: &mut dyn ItemVisitor) {
        let mut graph = GateGraph::default();
        for (index, item) in items.iter_mut().enumerate() {
            item.accept(ItemId(index), &mut graph, visitor);
        }
    }

    #[rstest]
    #[case(437.0, true)]
    #[case(600.0, false)]
    fn beam_reports_crossing_products(#[case] y: f64, #[case] detected: bool) {
        let mut items = vec![
            Item::Beam(Beam::new(DVec2::new(242.0, 437.0), -185.0, GateId(3))),
            product(150.0, y, Property::Red),
        ];
        let mut visitor = BeamDetectionVisitor::new();
        run(&mut items, &mut visitor);
        let detection = visitor.finish();
        assert_eq!(
            detection.readings,
            vec![BeamReading {
                beam: ItemId(0),
                gate: GateId(3),
                detected,
            }]
        );
        assert_eq!(detection.hit, detected.then_some(ItemId(1)));
    }

    #[test]
    fn products_before_a_beam_are_not_tested_against_it() {
        let mut items = vec![
            product(150.0, 437.0, Property::Red),
            Item::Beam(Beam::new(DVec2::new(242.0, 437.0), -185.0, GateId(0))),
        ];
        let mut visitor = BeamDetectionVisitor::new();
        run(&mut items, &mut visitor);
        assert!(!visitor.finish().any_detected());
    }

    #[test]
    fn sensor_lights_matching_outputs_only() {
        let outputs = vec![
            SensorOutput {
                property: Property::Red,
                gate: GateId(1),
            },
            SensorOutput {
                property: Property::Green,
                gate: GateId(2),
            },
        ];
        let mut items = vec![
            Item::Sensor(Sensor::new(DVec2::new(150.0, 450.0), outputs.clone())),
            product(150.0, 450.0, Property::Green),
            Item::Sensor(Sensor::new(DVec2::new(500.0, 450.0), outputs)),
            product(150.0, 450.0, Property::Red),
        ];
        let mut visitor = SensorDetectionVisitor::new();
        run(&mut items, &mut visitor);
        let readings = visitor.finish();
        assert_eq!(readings.len(), 2);
        assert_eq!(
            readings[0].writes,
            vec![(GateId(1), Signal::Zero), (GateId(2), Signal::One)]
        );
        assert_eq!(
            readings[1].writes,
            vec![(GateId(1), Signal::Zero), (GateId(2), Signal::Zero)]
        );
    }
}
