use crate::core::{envelope::Envelope, geo::Point};
use geo::BoundingRect;
use geo_types::Geometry;
use serde_json::{Map, Value};

/// A queryable map feature: an id, a geometry in world units and free-form
/// properties
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: String,
    pub geometry: Geometry<f64>,
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(id: impl Into<String>, geometry: impl Into<Geometry<f64>>) -> Self {
        Self {
            id: id.into(),
            geometry: geometry.into(),
            properties: Map::new(),
        }
    }

    /// Shorthand for a point feature
    pub fn point(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(id, geo_types::Point::new(x, y))
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Bounding box of the geometry; `None` for empty geometries
    pub fn bounding_box(&self) -> Option<Envelope> {
        self.geometry.bounding_rect().map(Envelope::from)
    }

    /// Center of the bounding box, the point hit tests measure against
    pub fn centroid(&self) -> Option<Point> {
        self.bounding_box().map(|bbox| bbox.centroid())
    }
}
