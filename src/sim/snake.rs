//! Snake body and growth bookkeeping

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::Cell;

/// Ordered body cells, head first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    body: VecDeque<Cell>,
    /// Pending segments still to be added (one per tick)
    growth: u32,
}

impl Snake {
    pub fn new(start: Cell) -> Self {
        Self {
            body: VecDeque::from([start]),
            growth: 0,
        }
    }

    pub fn head(&self) -> Cell {
        // Body is never empty: construction seeds one cell and settle() never pops the last
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn growth(&self) -> u32 {
        self.growth
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Whether moving the head onto `next` would hit the body
    ///
    /// The tail only counts when it stays put this step (growth pending).
    pub fn would_collide(&self, next: Cell) -> bool {
        let tail_vacates = self.growth == 0;
        let checked = if tail_vacates {
            self.body.len() - 1
        } else {
            self.body.len()
        };
        self.body.iter().take(checked).any(|&c| c == next)
    }

    /// Prepend a new head; the tail is resolved later by `settle`
    pub fn push_head(&mut self, head: Cell) {
        self.body.push_front(head);
    }

    /// Queue one segment of growth
    pub fn grow(&mut self) {
        self.growth += 1;
    }

    /// Consume one growth unit, or trim the tail if none is pending
    pub fn settle(&mut self) {
        if self.growth > 0 {
            self.growth -= 1;
        } else if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: &[Cell], growth: u32) -> Self {
        assert!(!cells.is_empty());
        Self {
            body: cells.iter().copied().collect(),
            growth,
        }
    }
}
