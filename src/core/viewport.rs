use crate::core::{envelope::Envelope, geo::Point};
use serde::{Deserialize, Serialize};

/// Camera state of the map: which world point sits in the middle of the
/// surface, how many world units one pixel covers, and how the view is
/// rotated.
///
/// A freshly created viewport has a NaN resolution and center. Every
/// transform on it is a no-op until [`Viewport::set_resolution`] and
/// [`Viewport::set_center`] have given it real values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// World point shown at the middle of the surface
    pub center: Point,
    /// World units per screen pixel (smaller = zoomed in)
    resolution: f64,
    /// Surface width in pixels
    pub width: f64,
    /// Surface height in pixels
    pub height: f64,
    /// Rotation in degrees
    rotation: f64,
    /// Render resolution multiplier handed through to renderers
    pub render_multiplier: f64,
}

impl Viewport {
    /// Creates an uninitialized viewport
    pub fn new() -> Self {
        Self {
            center: Point::nan(),
            resolution: f64::NAN,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            render_multiplier: 1.0,
        }
    }

    /// Creates a ready-to-use viewport, mostly useful for tests and headless tools
    pub fn with_state(center: Point, resolution: f64, width: f64, height: f64) -> Self {
        let mut viewport = Self::new();
        viewport.center = center;
        viewport.set_resolution(resolution);
        viewport.set_size(width, height);
        viewport
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// True once resolution and center hold real values
    pub fn is_initialized(&self) -> bool {
        self.resolution.is_finite() && self.resolution > 0.0 && self.center.is_finite()
    }

    pub fn is_rotated(&self) -> bool {
        self.rotation.is_finite() && self.rotation % 360.0 != 0.0
    }

    /// Sets the resolution; non-finite and non-positive values are ignored
    pub fn set_resolution(&mut self, resolution: f64) -> bool {
        if !resolution.is_finite() || resolution <= 0.0 {
            log::debug!("Ignoring invalid resolution {}", resolution);
            return false;
        }
        self.resolution = resolution;
        true
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Sets the rotation in degrees, normalized to [0, 360)
    pub fn set_rotation(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.rotation = degrees.rem_euclid(360.0);
        }
    }

    fn screen_center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Converts a screen pixel position to world coordinates
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.screen_to_world_with(screen, self.center, self.resolution)
    }

    /// Converts a world position to screen pixel coordinates
    pub fn world_to_screen(&self, world: Point) -> Point {
        let screen_center = self.screen_center();
        let screen = Point::new(
            (world.x - self.center.x) / self.resolution + screen_center.x,
            (self.center.y - world.y) / self.resolution + screen_center.y,
        );
        if self.is_rotated() {
            screen.rotate(self.rotation, &screen_center)
        } else {
            screen
        }
    }

    fn screen_to_world_with(&self, screen: Point, center: Point, resolution: f64) -> Point {
        let screen_center = self.screen_center();
        let screen = if self.is_rotated() {
            screen.rotate(-self.rotation, &screen_center)
        } else {
            screen
        };
        Point::new(
            center.x + (screen.x - screen_center.x) * resolution,
            center.y - (screen.y - screen_center.y) * resolution,
        )
    }

    /// Pan and zoom in one step.
    ///
    /// The world point under `previous` ends up under `current`, and the
    /// resolution is divided by `delta_scale`. Returns false without touching
    /// the state when the viewport is uninitialized or the scale is unusable.
    pub fn transform(&mut self, current: Point, previous: Point, delta_scale: f64) -> bool {
        if !self.is_initialized() {
            return false;
        }
        if !delta_scale.is_finite() || delta_scale <= 0.0 {
            log::debug!("Rejecting transform with delta scale {}", delta_scale);
            return false;
        }
        if !current.is_finite() || !previous.is_finite() {
            return false;
        }

        let anchor = self.screen_to_world(previous);
        let resolution = if delta_scale == 1.0 {
            self.resolution
        } else {
            self.resolution / delta_scale
        };
        // Offset of `current` from the center at the new resolution
        let offset = self
            .screen_to_world_with(current, self.center, resolution)
            .subtract(&self.center);

        self.resolution = resolution;
        self.center = anchor.subtract(&offset);
        true
    }

    /// Pans by a screen-space delta: the content follows the pointer
    pub fn pan_by(&mut self, delta: Point) -> bool {
        let origin = self.screen_center();
        self.transform(origin.add(&delta), origin, 1.0)
    }

    /// World envelope covering the whole (possibly rotated) surface
    pub fn extent(&self) -> Envelope {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(self.width, 0.0),
            Point::new(self.width, self.height),
            Point::new(0.0, self.height),
        ];
        let mut extent = Envelope::empty();
        for corner in corners {
            extent.extend(&self.screen_to_world(corner));
        }
        extent
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
