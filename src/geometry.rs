//! Axis-aligned boxes in level space.
//! Y grows downwards, so `top` is numerically smaller than `bottom`.
use glam::DVec2;

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest corner (left, top).
    pub min: DVec2,
    /// Largest corner (right, bottom).
    pub max: DVec2,
}

impl Bounds {
    /// Box of `size` centred on `centre`.
    ///
    /// # Examples
    /// ```
    /// use glam::DVec2;
    /// use sparty::geometry::Bounds;
    /// let bounds = Bounds::centred(DVec2::new(100.0, 50.0), DVec2::splat(80.0));
    /// assert_eq!(bounds.top(), 10.0);
    /// assert_eq!(bounds.right(), 140.0);
    /// ```
    #[must_use]
    pub fn centred(centre: DVec2, size: DVec2) -> Self {
        let half = size / 2.0;
        Self {
            min: centre - half,
            max: centre + half,
        }
    }

    /// Box with its top-left corner at `corner`.
    #[must_use]
    pub fn from_corner(corner: DVec2, size: DVec2) -> Self {
        Self {
            min: corner,
            max: corner + size,
        }
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> f64 {
        self.min.x
    }

    /// Right edge.
    #[must_use]
    pub const fn right(&self) -> f64 {
        self.max.x
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> f64 {
        self.min.y
    }

    /// Bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> f64 {
        self.max.y
    }

    /// Half-open containment: the top and left edges are inside, the
    /// bottom and right edges are not.
    #[must_use]
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.min.x && point.y >= self.min.y && point.x < self.max.x && point.y < self.max.y
    }

    /// Whether the vertical extent touches the closed band `[top, bottom]`.
    #[must_use]
    pub fn touches_band(&self, top: f64, bottom: f64) -> bool {
        self.bottom() >= top && self.top() <= bottom
    }
}
