pub mod base;
pub mod feature;
pub mod feature_info;
pub mod manager;
pub mod memory;

pub use base::Layer;
pub use feature::Feature;
pub use feature_info::{FeatureInfoMap, FeatureInfoReply, FeatureInfoSource};
pub use manager::LayerManager;
pub use memory::MemoryLayer;
