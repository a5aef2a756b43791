//! Square board lattice
//!
//! Cells use screen orientation: x grows to the right, y grows downward.

use serde::{Deserialize, Serialize};

/// A discrete board coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell reached by moving one step along `vel`
    #[inline]
    pub fn offset(self, vel: Velocity) -> Self {
        Self {
            x: self.x + vel.dx,
            y: self.y + vel.dy,
        }
    }
}

/// Movement vector applied once per tick
///
/// Only the zero vector and the four axis-aligned unit vectors are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Velocity {
    pub const STILL: Velocity = Velocity { dx: 0, dy: 0 };
    pub const UP: Velocity = Velocity { dx: 0, dy: -1 };
    pub const DOWN: Velocity = Velocity { dx: 0, dy: 1 };
    pub const LEFT: Velocity = Velocity { dx: -1, dy: 0 };
    pub const RIGHT: Velocity = Velocity { dx: 1, dy: 0 };

    pub fn is_still(&self) -> bool {
        *self == Self::STILL
    }

    /// True if `other` points exactly the opposite way (never true for STILL)
    pub fn is_reverse_of(&self, other: Velocity) -> bool {
        !self.is_still() && self.dx == -other.dx && self.dy == -other.dy
    }
}

/// Fixed-size square board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: i32,
}

impl Grid {
    pub fn new(size: u32) -> Self {
        Self {
            size: size.max(1) as i32,
        }
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size as u32
    }

    /// Total number of cells on the board
    #[inline]
    pub fn area(&self) -> usize {
        (self.size * self.size) as usize
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.size).contains(&cell.x) && (0..self.size).contains(&cell.y)
    }

    /// Starting cell for a fresh snake
    pub fn center(&self) -> Cell {
        Cell::new(self.size / 2, self.size / 2)
    }

    /// Cell at a row-major index in `0..area()`
    pub fn cell_at(&self, index: usize) -> Cell {
        let index = index as i32;
        Cell::new(index % self.size, index / self.size)
    }

    /// Row-major iteration over every cell
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.area()).map(|i| self.cell_at(i))
    }
}
