//! Prelude module for common mapview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapview::prelude::*;`

pub use crate::core::{
    config::{
        AnimationConfig, GestureConfig, HitTestConfig, InteractionOptions, InteractionProfile,
        ViewOptions,
    },
    envelope::Envelope,
    geo::Point,
    resolutions::ResolutionLadder,
    view::ViewController,
    viewport::Viewport,
};

pub use crate::layers::{
    Feature, FeatureInfoMap, FeatureInfoReply, FeatureInfoSource, Layer, LayerManager, MemoryLayer,
};

pub use crate::input::{
    events::{EventManager, InputEvent, KeyCode, KeyRole, MouseButton, PointerSource, ViewEvent},
    gestures::{Action, GestureController, GestureState},
};

pub use crate::animation::{
    AnimationFrame, Easing, EasingType, FrameClock, ZoomAnimator,
};

pub use crate::spatial::{HitTestResult, HitTester};

pub use crate::runtime::{AsyncFeatureInfoSource, DispatchHandle, ThreadedFeatureInfo};

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::{spawn_feature_info, TokioFeatureInfo};

pub use crate::rendering::{Color, Renderer};

pub use crate::traits::Lerp;

pub use crate::{DataFetchError, Error as MapError, Result};

pub use std::{collections::VecDeque, sync::Arc, time::Duration};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};
