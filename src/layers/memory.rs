use crate::{
    core::envelope::Envelope,
    layers::{base::Layer, feature::Feature, feature_info::FeatureInfoSource},
};
use rstar::{RTree, RTreeObject, AABB};

/// A feature stored together with its bounding box
#[derive(Debug, Clone)]
struct IndexedFeature {
    bounds: Envelope,
    feature: Feature,
}

impl PartialEq for IndexedFeature {
    fn eq(&self, other: &Self) -> bool {
        self.feature.id == other.feature.id
    }
}

// --- rstar integration -------------------------------------------------------------------------

impl RTreeObject for IndexedFeature {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min.x, self.bounds.min.y],
            [self.bounds.max.x, self.bounds.max.y],
        )
    }
}

/// In-memory feature layer backed by an R-tree
pub struct MemoryLayer {
    name: String,
    visible: bool,
    rtree: RTree<IndexedFeature>,
    envelope: Option<Envelope>,
    feature_info: Option<Box<dyn FeatureInfoSource>>,
}

impl MemoryLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            rtree: RTree::new(),
            envelope: None,
            feature_info: None,
        }
    }

    pub fn with_features(name: impl Into<String>, features: Vec<Feature>) -> Self {
        let mut layer = Self::new(name);
        for feature in features {
            layer.insert(feature);
        }
        layer
    }

    pub fn with_feature_info<S: FeatureInfoSource + 'static>(mut self, source: S) -> Self {
        self.feature_info = Some(Box::new(source));
        self
    }

    /// Adds a feature; features without a bounding box are skipped
    pub fn insert(&mut self, feature: Feature) -> bool {
        let Some(bounds) = feature.bounding_box() else {
            log::debug!("Skipping feature {} without geometry extent", feature.id);
            return false;
        };

        match self.envelope.as_mut() {
            Some(envelope) => {
                envelope.extend(&bounds.min);
                envelope.extend(&bounds.max);
            }
            None => self.envelope = Some(bounds),
        }

        self.rtree.insert(IndexedFeature { bounds, feature });
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<Feature> {
        // First find the element immutably, clone it, then remove mutably.
        let found = self.rtree.iter().find(|item| item.feature.id == id).cloned()?;
        let removed = self.rtree.remove(&found)?;

        self.envelope = if self.rtree.size() == 0 {
            None
        } else {
            let env = self.rtree.root().envelope();
            Some(Envelope::from_coords(
                env.lower()[0],
                env.lower()[1],
                env.upper()[0],
                env.upper()[1],
            ))
        };

        Some(removed.feature)
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    pub fn clear(&mut self) {
        self.rtree = RTree::new();
        self.envelope = None;
    }
}

impl Layer for MemoryLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn envelope(&self) -> Option<Envelope> {
        self.envelope
    }

    fn features_in_view(&self, envelope: &Envelope, margin: f64) -> Vec<Feature> {
        if !envelope.is_initialized() {
            return Vec::new();
        }
        let query = envelope.grow(margin.max(0.0));
        let aabb = AABB::from_corners([query.min.x, query.min.y], [query.max.x, query.max.y]);
        self.rtree
            .locate_in_envelope_intersecting(&aabb)
            .map(|item| item.feature.clone())
            .collect()
    }

    fn feature_info_source(&self) -> Option<&dyn FeatureInfoSource> {
        self.feature_info.as_deref()
    }
}

impl std::fmt::Debug for MemoryLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryLayer")
            .field("name", &self.name)
            .field("features", &self.rtree.size())
            .field("envelope", &self.envelope)
            .finish()
    }
}
