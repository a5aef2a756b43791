//! Directional intent buffering and the reversal guard
//!
//! Input handlers only ever write a single pending direction into an
//! [`IntentSlot`]. The tick reads and clears it once per step, so input
//! can't be observed half-applied.

use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use super::grid::Velocity;

/// One of the four board movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn velocity(self) -> Velocity {
        match self {
            Direction::Up => Velocity::UP,
            Direction::Down => Velocity::DOWN,
            Direction::Left => Velocity::LEFT,
            Direction::Right => Velocity::RIGHT,
        }
    }

    fn encode(self) -> u8 {
        match self {
            Direction::Up => 1,
            Direction::Down => 2,
            Direction::Left => 3,
            Direction::Right => 4,
        }
    }

    fn decode(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Direction::Up),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            4 => Some(Direction::Right),
            _ => None,
        }
    }
}

const EMPTY: u8 = 0;

/// Single-slot, last-writer-wins pending direction
#[derive(Debug, Default)]
pub struct IntentSlot {
    slot: AtomicU8,
}

impl IntentSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite whatever is pending
    pub fn write(&self, dir: Direction) {
        self.slot.store(dir.encode(), Ordering::Release);
    }

    /// Read and clear the pending direction
    pub fn take(&self) -> Option<Direction> {
        Direction::decode(self.slot.swap(EMPTY, Ordering::AcqRel))
    }

    pub fn peek(&self) -> Option<Direction> {
        Direction::decode(self.slot.load(Ordering::Acquire))
    }

    pub fn clear(&self) {
        self.slot.store(EMPTY, Ordering::Release);
    }
}

/// Apply a pending intent to the committed velocity
///
/// An exact reversal of the committed velocity is dropped. The check runs
/// against the committed value, so several taps within one interval can't
/// chain into a 180 degree turn.
pub fn commit(committed: Velocity, pending: Option<Direction>) -> Velocity {
    match pending {
        Some(dir) if !dir.velocity().is_reverse_of(committed) => dir.velocity(),
        Some(dir) => {
            log::debug!("Dropped reversing intent {:?}", dir);
            committed
        }
        None => committed,
    }
}
