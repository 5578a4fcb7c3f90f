pub mod renderer;

// Re-export main types
pub use renderer::{Color, Renderer};
