use serde::{Deserialize, Serialize};

/// A point in either screen (pixel) or world (map unit) space.
///
/// Screen points grow right/down from the top-left corner of the surface;
/// world points grow right/up. Which space a point lives in is decided by
/// the API that hands it out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A point with both coordinates NaN, used for "not set yet" centers
    pub fn nan() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Rotates this point by `degrees` (counter-clockwise in a y-up frame)
    /// around `origin`.
    pub fn rotate(&self, degrees: f64, origin: &Point) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        Point::new(
            origin.x + dx * cos - dy * sin,
            origin.y + dx * sin + dy * cos,
        )
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<geo_types::Coord<f64>> for Point {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        Point::new(coord.x, coord.y)
    }
}

impl From<Point> for geo_types::Coord<f64> {
    fn from(point: Point) -> Self {
        geo_types::Coord {
            x: point.x,
            y: point.y,
        }
    }
}
