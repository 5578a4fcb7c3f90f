//! Core constants for the view engine.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Tolerance for treating floating point gesture values as "unchanged".
pub const EPSILON: f64 = 0.000_000_1;

/// Resolution used when the data envelope has no width (an empty map).
pub const DEFAULT_RESOLUTION: f64 = 1.0;

/// On-screen pick radius in pixels for hover and click hit tests.
pub const HIT_TOLERANCE_PIXELS: f64 = 16.0;

/// Duration of ladder-step zoom animations.
pub const ZOOM_ANIMATION_DURATION_MS: u64 = 1000;

/// Resolution of zoom level 0 in the spherical mercator tile pyramid (meters per pixel).
pub const WEB_MERCATOR_MAX_RESOLUTION: f64 = 156_543.033_928_040_97;

/// Number of zoom levels in the default mercator ladder (0..=19).
pub const WEB_MERCATOR_LEVELS: usize = 20;
