//! Camera sensor with one output pin per watched property.

use glam::DVec2;

use super::{Product, Property};
use crate::constants::{
    SENSOR_CABLE_WIDTH, SENSOR_CAMERA_WIDTH, SENSOR_LEAD_LENGTH, SENSOR_PANEL_HEIGHT,
    SENSOR_PANEL_OFFSET_Y, SENSOR_PANEL_WIDTH, SENSOR_RANGE,
};
use crate::logic::{GateId, Signal};

/// One output panel of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorOutput {
    /// Property the panel lights up for.
    pub property: Property,
    /// Output bridge gate driven by the panel.
    pub gate: GateId,
}

/// Watches a band of the belt and raises the outputs whose property matches
/// a product in view.
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    position: DVec2,
    outputs: Vec<SensorOutput>,
}

impl Sensor {
    /// Creates a sensor at `position` with panels in the given order.
    #[must_use]
    pub const fn new(position: DVec2, outputs: Vec<SensorOutput>) -> Self {
        Self { position, outputs }
    }

    /// Top-left corner of panel `index` for a sensor at `position`.
    #[must_use]
    pub fn panel_origin(position: DVec2, index: usize) -> DVec2 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "Panel counts are tiny, far below f64 precision limits."
        )]
        let row = index as f64;
        position
            + DVec2::new(
                SENSOR_CABLE_WIDTH / 2.0,
                SENSOR_PANEL_OFFSET_Y + row * SENSOR_PANEL_HEIGHT,
            )
    }

    /// Output pin location of panel `index` for a sensor at `position`.
    #[must_use]
    pub fn pin_location(position: DVec2, index: usize) -> DVec2 {
        Self::panel_origin(position, index)
            + DVec2::new(
                SENSOR_PANEL_WIDTH + SENSOR_LEAD_LENGTH,
                SENSOR_PANEL_HEIGHT / 2.0,
            )
    }

    /// Camera position.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Panels in display order.
    #[must_use]
    pub fn outputs(&self) -> &[SensorOutput] {
        &self.outputs
    }

    /// Whether the product centre is under the camera and its body touches
    /// the detection band.
    #[must_use]
    pub fn in_range(&self, product: &Product) -> bool {
        let half = SENSOR_CAMERA_WIDTH / 2.0;
        let x = product.position().x;
        let within_x = x >= self.position.x - half && x <= self.position.x + half;
        let (top, bottom) = SENSOR_RANGE;
        within_x
            && product
                .bounds()
                .touches_band(self.position.y + top, self.position.y + bottom)
    }

    /// Output values for a frame in which `seen` properties were in view.
    pub fn output_states<'a>(
        &'a self,
        seen: &'a [Property],
    ) -> impl Iterator<Item = (GateId, Signal)> + 'a {
        self.outputs
            .iter()
            .map(|output| (output.gate, Signal::from_bool(seen.contains(&output.property))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn product_at(x: f64, y: f64) -> Product {
        let mut product = Product::new(Property::Square, Property::Green, Property::Izzo, false);
        product.place(DVec2::new(x, y));
        product
    }

    #[rstest]
    #[case(150.0, 450.0, true)]
    #[case(200.0, 400.0, true)]
    #[case(201.0, 450.0, false)]
    #[case(150.0, 505.0, true)]
    #[case(150.0, 506.0, false)]
    #[case(150.0, 369.0, false)]
    fn band_and_camera_width(#[case] x: f64, #[case] y: f64, #[case] seen: bool) {
        let sensor = Sensor::new(DVec2::new(150.0, 450.0), Vec::new());
        assert_eq!(sensor.in_range(&product_at(x, y)), seen);
    }

    #[test]
    fn only_seen_properties_light_up() {
        let sensor = Sensor::new(
            DVec2::ZERO,
            vec![
                SensorOutput {
                    property: Property::Red,
                    gate: GateId(1),
                },
                SensorOutput {
                    property: Property::Izzo,
                    gate: GateId(2),
                },
            ],
        );
        let seen = [Property::Green, Property::Square, Property::Izzo];
        let states: Vec<_> = sensor.output_states(&seen).collect();
        assert_eq!(
            states,
            vec![(GateId(1), Signal::Zero), (GateId(2), Signal::One)]
        );
    }

    #[test]
    fn panels_stack_downwards() {
        let first = Sensor::pin_location(DVec2::new(150.0, 450.0), 0);
        let second = Sensor::pin_location(DVec2::new(150.0, 450.0), 1);
        assert_eq!(first, DVec2::new(150.0 + 10.0 + 120.0, 450.0 + 87.0 + 20.0));
        assert_eq!(second.y - first.y, 40.0);
    }
}
