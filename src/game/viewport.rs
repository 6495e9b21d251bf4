//! Mapping between device pixels and level space.

use glam::DVec2;

/// Uniform scale plus letterbox offset that fits a level into a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f64,
    offset: DVec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: DVec2::ZERO,
        }
    }
}

impl Viewport {
    /// Fits a `level`-sized area into a `device`-sized window, centred
    /// horizontally and, when there is room, vertically.
    ///
    /// # Examples
    /// ```
    /// use glam::DVec2;
    /// use sparty::game::Viewport;
    /// let view = Viewport::fit(DVec2::new(2300.0, 1000.0), DVec2::new(1150.0, 800.0));
    /// assert_eq!(view.scale(), 1.25);
    /// assert_eq!(view.to_level(DVec2::new(431.25, 0.0)), DVec2::ZERO);
    /// ```
    #[must_use]
    pub fn fit(device: DVec2, level: DVec2) -> Self {
        if level.x <= 0.0 || level.y <= 0.0 {
            return Self::default();
        }
        let scale = (device.x / level.x).min(device.y / level.y);
        let x = (device.x - level.x * scale) / 2.0;
        let y = ((device.y - level.y * scale) / 2.0).max(0.0);
        Self {
            scale,
            offset: DVec2::new(x, y),
        }
    }

    /// Device pixels per level pixel.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Device position of the level origin.
    #[must_use]
    pub const fn offset(&self) -> DVec2 {
        self.offset
    }

    /// Converts a device position to level space.
    #[must_use]
    pub fn to_level(&self, device: DVec2) -> DVec2 {
        if self.scale.abs() < f64::EPSILON {
            return DVec2::ZERO;
        }
        (device - self.offset) / self.scale
    }

    /// Converts a level position to device pixels.
    #[must_use]
    pub fn to_device(&self, level: DVec2) -> DVec2 {
        level * self.scale + self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(DVec2::new(1150.0, 800.0), 1.0, DVec2::ZERO)]
    #[case(DVec2::new(575.0, 800.0), 0.5, DVec2::new(0.0, 200.0))]
    #[case(DVec2::new(2300.0, 800.0), 1.0, DVec2::new(575.0, 0.0))]
    fn letterboxes_the_short_side(#[case] device: DVec2, #[case] scale: f64, #[case] offset: DVec2) {
        let view = Viewport::fit(device, DVec2::new(1150.0, 800.0));
        assert_relative_eq!(view.scale(), scale);
        assert_relative_eq!(view.offset().x, offset.x);
        assert_relative_eq!(view.offset().y, offset.y);
    }

    #[test]
    fn device_and_level_space_invert() {
        let view = Viewport::fit(DVec2::new(1920.0, 1080.0), DVec2::new(1150.0, 800.0));
        let point = DVec2::new(300.0, 420.0);
        let back = view.to_level(view.to_device(point));
        assert_relative_eq!(back.x, point.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, point.y, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_level_uses_identity() {
        assert_eq!(Viewport::fit(DVec2::ONE, DVec2::ZERO), Viewport::default());
    }
}
