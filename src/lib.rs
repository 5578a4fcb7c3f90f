//! # mapview
//!
//! Interactive 2D map view engine.
//!
//! The crate keeps a camera-like view state (center, resolution, rotation,
//! surface size) over an unbounded planar world and turns pointer, wheel,
//! keyboard and touch input into pans, ladder zoom steps, box zooms and
//! animated resolution changes. Hover and click positions are resolved to
//! the nearest feature of the registered layers.
//!
//! Rendering, windowing and data loading stay with the host: it feeds
//! [`InputEvent`]s and paint ticks into a [`ViewController`] and draws through
//! its own [`Renderer`].

pub mod animation;
pub mod core;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod runtime;
pub mod spatial;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::{InteractionOptions, InteractionProfile, ViewOptions},
    envelope::Envelope,
    geo::Point,
    resolutions::ResolutionLadder,
    view::ViewController,
    viewport::Viewport,
};

pub use layers::{
    Feature, FeatureInfoMap, FeatureInfoReply, FeatureInfoSource, Layer, LayerManager, MemoryLayer,
};

pub use input::{Action, GestureController, InputEvent, KeyCode, ViewEvent};

pub use rendering::{Color, Renderer};

pub use spatial::{HitTestResult, HitTester};

pub use animation::{EasingType, FrameClock, ZoomAnimator};

pub use runtime::{DispatchHandle, DispatchQueue};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid resolutions: {0}")]
    InvalidResolutions(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Feature info error: {0}")]
    FeatureInfo(#[from] DataFetchError),

    #[error("Dispatch error: {0}")]
    Dispatch(String),
}

/// Failure reported by an asynchronous data or feature-info load.
///
/// The `Display` text is what the view shows as its error message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataFetchError {
    #[error("Cancelled")]
    Cancelled,

    #[error("Transport error: {0}")]
    Transport(String),

    /// Anything else, labelled with the failing component's error kind
    #[error("{kind}: {message}")]
    Other { kind: String, message: String },
}

impl DataFetchError {
    pub fn other(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Other {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Error type alias for convenience
pub type Error = MapError;
