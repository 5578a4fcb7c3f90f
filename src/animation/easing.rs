use serde::{Deserialize, Serialize};

/// Maps normalized animation time (0.0..=1.0) to normalized progress.
///
/// Implemented by [`EasingType`] and by any `Fn(f64) -> f64`, so callers can
/// plug in curves from their own easing library.
pub trait Easing: Send + Sync {
    fn ease(&self, t: f64) -> f64;
}

impl<F> Easing for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn ease(&self, t: f64) -> f64 {
        self(t)
    }
}

/// Built-in easing curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    /// Quartic ease-out, the default for zoom steps
    #[default]
    EaseOutQuart,
    /// Smooth step (3t^2 - 2t^3)
    Smooth,
}

impl EasingType {
    /// Apply easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseInCubic => t * t * t,
            EasingType::EaseOutCubic => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingType::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingType::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            EasingType::Smooth => t * t * (3.0 - 2.0 * t),
        }
    }
}

impl Easing for EasingType {
    fn ease(&self, t: f64) -> f64 {
        self.apply(t)
    }
}
