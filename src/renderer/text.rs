//! Plain-text board renderer (native demo and tests)

use super::RenderSink;
use crate::sim::{BoardSnapshot, Cell};

const EMPTY: char = '.';
const HEAD: char = '@';
const BODY: char = 'o';
const APPLE: char = '*';

/// Renders each snapshot to a grid of characters
#[derive(Debug, Default)]
pub struct TextRenderer {
    frame: String,
    frames_drawn: u64,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently drawn frame
    pub fn frame(&self) -> &str {
        &self.frame
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

impl RenderSink for TextRenderer {
    fn draw(&mut self, snapshot: &BoardSnapshot) {
        let size = snapshot.grid_size as usize;
        let mut rows = vec![vec![EMPTY; size]; size];

        let mut plot = |cell: Cell, ch: char| {
            if (0..size as i32).contains(&cell.x) && (0..size as i32).contains(&cell.y) {
                rows[cell.y as usize][cell.x as usize] = ch;
            }
        };

        if let Some(apple) = snapshot.apple {
            plot(apple, APPLE);
        }
        for (i, &cell) in snapshot.snake.iter().enumerate() {
            plot(cell, if i == 0 { HEAD } else { BODY });
        }

        self.frame = rows
            .into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        self.frames_drawn += 1;
    }
}
