//! Canvas 2D renderer (WASM only)

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{RenderSink, palette};
use crate::sim::BoardSnapshot;

/// Draws the board into a `<canvas>`
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Returns `None` if the canvas has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Clear to the background color
    pub fn clear(&self) {
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.set_fill_style_str(palette::BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }
}

impl RenderSink for CanvasRenderer {
    fn draw(&mut self, snapshot: &BoardSnapshot) {
        self.clear();
        let tile = self.canvas.width() as f64 / snapshot.grid_size.max(1) as f64;

        self.ctx.set_fill_style_str(palette::SNAKE);
        for cell in &snapshot.snake {
            self.ctx.fill_rect(
                cell.x as f64 * tile,
                cell.y as f64 * tile,
                tile - 1.0,
                tile - 1.0,
            );
        }

        if let Some(apple) = snapshot.apple {
            self.ctx.set_fill_style_str(palette::APPLE);
            self.ctx.begin_path();
            let drawn = self.ctx.arc(
                apple.x as f64 * tile + tile / 2.0,
                apple.y as f64 * tile + tile / 2.0,
                tile / 2.0 - 1.0,
                0.0,
                std::f64::consts::TAU,
            );
            if drawn.is_ok() {
                self.ctx.fill();
            }
        }
    }
}
