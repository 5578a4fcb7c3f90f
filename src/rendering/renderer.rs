use crate::{core::viewport::Viewport, layers::Layer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Serializable RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Paints layers onto a host surface.
///
/// Called by the view controller from the interaction thread during a paint
/// tick, never concurrently with a viewport mutation, so the viewport it
/// receives is a consistent snapshot.
pub trait Renderer {
    type Surface;

    fn render(
        &mut self,
        surface: &mut Self::Surface,
        viewport: &Viewport,
        layers: &[Arc<dyn Layer>],
        background: Color,
    );
}
