use crate::{
    core::envelope::Envelope,
    layers::{feature::Feature, feature_info::FeatureInfoSource},
};

/// A source of features the view can hit-test and hand to a renderer.
///
/// Data fetching and caching stay inside the implementation; the view only
/// asks for what intersects an envelope.
pub trait Layer: Send + Sync {
    /// Name reported in hover/click notifications
    fn name(&self) -> &str;

    fn is_visible(&self) -> bool {
        true
    }

    /// World extent of the layer's data, if it has any yet
    fn envelope(&self) -> Option<Envelope>;

    /// Features intersecting `envelope` grown by `margin` world units
    fn features_in_view(&self, envelope: &Envelope, margin: f64) -> Vec<Feature>;

    /// Optional asynchronous click lookup
    fn feature_info_source(&self) -> Option<&dyn FeatureInfoSource> {
        None
    }
}
