pub mod clock;
pub mod easing;
pub mod zoom;

// Re-export commonly used types for convenience
pub use clock::FrameClock;
pub use easing::{Easing, EasingType};
pub use zoom::{AnimationFrame, ZoomAnimator};
