use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in world (or screen) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub min: Point,
    pub max: Point,
}

impl Envelope {
    /// Creates an envelope from two points
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates an envelope from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Creates the normalized envelope spanned by two arbitrary corners
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::from_coords(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Creates empty bounds (invalid bounds that can be extended)
    pub fn empty() -> Self {
        Self::new(
            Point::new(f64::INFINITY, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        )
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn centroid(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// True when all four coordinates are finite and min <= max.
    /// Data layers report NaN/infinite envelopes until they hold data.
    pub fn is_initialized(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.is_valid()
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    pub fn extend(&mut self, point: &Point) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Returns a copy grown by `amount` on every side
    pub fn grow(&self, amount: f64) -> Envelope {
        Envelope::from_coords(
            self.min.x - amount,
            self.min.y - amount,
            self.max.x + amount,
            self.max.y + amount,
        )
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<geo_types::Rect<f64>> for Envelope {
    fn from(rect: geo_types::Rect<f64>) -> Self {
        Envelope::new(rect.min().into(), rect.max().into())
    }
}
