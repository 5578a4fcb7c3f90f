use crate::{
    core::envelope::Envelope,
    layers::base::Layer,
    MapError, Result,
};
use std::sync::Arc;

/// Ordered set of layers; the first layer added has hit-test priority and is
/// drawn first
#[derive(Default)]
pub struct LayerManager {
    layers: Vec<Arc<dyn Layer>>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Adds a layer; names must be unique
    pub fn add_layer(&mut self, layer: Arc<dyn Layer>) -> Result<()> {
        if self.get_layer(layer.name()).is_some() {
            return Err(MapError::Layer(format!(
                "duplicate layer name '{}'",
                layer.name()
            )));
        }
        log::debug!("Adding layer {}", layer.name());
        self.layers.push(layer);
        Ok(())
    }

    pub fn remove_layer(&mut self, name: &str) -> Option<Arc<dyn Layer>> {
        let index = self.layers.iter().position(|l| l.name() == name)?;
        Some(self.layers.remove(index))
    }

    pub fn get_layer(&self, name: &str) -> Option<&Arc<dyn Layer>> {
        self.layers.iter().find(|l| l.name() == name)
    }

    /// All layers in priority order
    pub fn layers(&self) -> &[Arc<dyn Layer>] {
        &self.layers
    }

    /// Visible layers in priority order
    pub fn visible_layers(&self) -> Vec<Arc<dyn Layer>> {
        self.layers
            .iter()
            .filter(|l| l.is_visible())
            .cloned()
            .collect()
    }

    /// Visible layers whose name is in `names`, in priority order.
    /// Unknown names are skipped.
    pub fn visible_layers_named(&self, names: &[String]) -> Vec<Arc<dyn Layer>> {
        self.layers
            .iter()
            .filter(|l| l.is_visible() && names.iter().any(|n| n == l.name()))
            .cloned()
            .collect()
    }

    pub fn list_layers(&self) -> Vec<String> {
        self.layers.iter().map(|l| l.name().to_string()).collect()
    }

    /// Union of the envelopes of all layers that have data
    pub fn envelope(&self) -> Option<Envelope> {
        self.layers
            .iter()
            .filter_map(|l| l.envelope())
            .filter(Envelope::is_initialized)
            .reduce(|mut acc, env| {
                acc.extend(&env.min);
                acc.extend(&env.max);
                acc
            })
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl std::fmt::Debug for LayerManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerManager")
            .field("layers", &self.list_layers())
            .finish()
    }
}
