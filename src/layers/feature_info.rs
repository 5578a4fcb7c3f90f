use crate::{
    core::{geo::Point, view::ViewController, viewport::Viewport},
    layers::feature::Feature,
    prelude::HashMap,
    runtime::DispatchHandle,
    DataFetchError,
};

/// Features per layer name returned by a click lookup
pub type FeatureInfoMap = HashMap<String, Vec<Feature>>;

/// Layer capability for click lookups that may take a while (remote
/// services, large files).
///
/// The implementation may complete `reply` from any thread; the result is
/// applied on the interaction thread the next time the view drains its
/// dispatch queue.
pub trait FeatureInfoSource: Send + Sync {
    fn request_feature_info(&self, viewport: &Viewport, position: Point, reply: FeatureInfoReply);
}

/// One-shot completion handle for a feature-info request
#[derive(Debug)]
pub struct FeatureInfoReply {
    layer_name: String,
    dispatch: DispatchHandle,
}

impl FeatureInfoReply {
    pub(crate) fn new(layer_name: String, dispatch: DispatchHandle) -> Self {
        Self {
            layer_name,
            dispatch,
        }
    }

    /// Name of the layer the request was issued for
    pub fn layer_name(&self) -> &str {
        &self.layer_name
    }

    pub fn send(self, info: FeatureInfoMap) {
        let posted = self
            .dispatch
            .post(move |view: &mut ViewController| view.deliver_feature_info(info));
        if let Err(e) = posted {
            log::warn!("Dropping feature info for {}: {}", self.layer_name, e);
        }
    }

    /// Reports a failed lookup; it surfaces as an error message on the view
    pub fn fail(self, error: DataFetchError) {
        let posted = self
            .dispatch
            .post(move |view: &mut ViewController| view.data_changed(Err(error)));
        if let Err(e) = posted {
            log::warn!("Dropping feature info error for {}: {}", self.layer_name, e);
        }
    }
}
