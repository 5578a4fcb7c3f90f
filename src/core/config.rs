//! Configuration for view behavior tuning
//!
//! Interaction behavior (animation timing, gesture noise filtering, pick
//! tolerance) is grouped into [`InteractionOptions`], which can be picked
//! from a preset profile or loaded from JSON.

use crate::{
    animation::EasingType,
    core::{
        constants::{EPSILON, HIT_TOLERANCE_PIXELS, ZOOM_ANIMATION_DURATION_MS},
        resolutions::ResolutionLadder,
    },
    rendering::Color,
    Result,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionProfile {
    /// Animated ladder zooms with quartic ease-out
    Balanced,
    /// Zoom steps jump straight to the target resolution
    Instant,
    /// Slower, smooth-step zoom animations
    Smooth,
    Custom(InteractionOptions),
}

impl InteractionProfile {
    pub fn resolve(&self) -> InteractionOptions {
        match self {
            Self::Balanced => InteractionOptions {
                animation: AnimationConfig {
                    animate_zoom: true,
                    zoom_duration_ms: ZOOM_ANIMATION_DURATION_MS,
                    zoom_easing: EasingType::EaseOutQuart,
                },
                gestures: GestureConfig::default(),
                hit_test: HitTestConfig::default(),
            },
            Self::Instant => InteractionOptions {
                animation: AnimationConfig {
                    animate_zoom: false,
                    zoom_duration_ms: 0,
                    zoom_easing: EasingType::Linear,
                },
                gestures: GestureConfig::default(),
                hit_test: HitTestConfig::default(),
            },
            Self::Smooth => InteractionOptions {
                animation: AnimationConfig {
                    animate_zoom: true,
                    zoom_duration_ms: 1500,
                    zoom_easing: EasingType::Smooth,
                },
                gestures: GestureConfig::default(),
                hit_test: HitTestConfig::default(),
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for InteractionProfile {
    fn default() -> Self {
        Self::Balanced
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionOptions {
    pub animation: AnimationConfig,
    pub gestures: GestureConfig,
    pub hit_test: HitTestConfig,
}

impl InteractionOptions {
    /// Parses options from JSON; missing fields fall back to the balanced profile
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for InteractionOptions {
    fn default() -> Self {
        InteractionProfile::default().resolve()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// When false, ladder steps are applied in a single frame
    pub animate_zoom: bool,
    pub zoom_duration_ms: u64,
    pub zoom_easing: EasingType,
}

impl AnimationConfig {
    pub fn zoom_duration(&self) -> Duration {
        if self.animate_zoom {
            Duration::from_millis(self.zoom_duration_ms)
        } else {
            Duration::ZERO
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            animate_zoom: true,
            zoom_duration_ms: ZOOM_ANIMATION_DURATION_MS,
            zoom_easing: EasingType::EaseOutQuart,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Pinch scales closer than this to 1.0 (or to 0.0) count as "no zoom"
    pub scale_epsilon: f64,
    pub wheel_zoom: bool,
    pub drag_pan: bool,
    pub touch_manipulation: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            scale_epsilon: EPSILON,
            wheel_zoom: true,
            drag_pan: true,
            touch_manipulation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTestConfig {
    /// Pick radius in screen pixels; multiplied by the resolution per query
    pub tolerance_pixels: f64,
}

impl Default for HitTestConfig {
    fn default() -> Self {
        Self {
            tolerance_pixels: HIT_TOLERANCE_PIXELS,
        }
    }
}

/// Options for a view controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    /// Permitted zoom steps
    pub resolutions: ResolutionLadder,
    /// Passed to the renderer every frame
    pub background: Color,
    /// Blocks wheel and pinch zoom and the ladder steps of `zoom_in`/`zoom_out`
    pub zoom_locked: bool,
    pub interaction: InteractionProfile,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            resolutions: ResolutionLadder::empty(),
            background: Color::WHITE,
            zoom_locked: false,
            interaction: InteractionProfile::default(),
        }
    }
}
