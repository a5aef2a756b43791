//! Render adapter boundary
//!
//! Renderers get an immutable [`BoardSnapshot`] and redraw the whole board
//! from it. They never touch game state.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod text;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use text::TextRenderer;

use crate::sim::BoardSnapshot;

/// Anything that can draw a board snapshot
pub trait RenderSink {
    fn draw(&mut self, snapshot: &BoardSnapshot);
}

/// Board colors
pub mod palette {
    pub const BACKGROUND: &str = "#f0f0f0";
    pub const SNAKE: &str = "#4CAF50";
    pub const APPLE: &str = "#FF5252";
}
