//! Deterministic game core
//!
//! All board logic lives here. This module must stay pure and deterministic:
//! - One step per tick, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod grid;
pub mod intent;
pub mod snake;
pub mod spawner;
pub mod state;
pub mod tick;

pub use grid::{Cell, Grid, Velocity};
pub use intent::{Direction, IntentSlot, commit};
pub use snake::Snake;
pub use spawner::spawn_apple;
pub use state::{
    BoardSnapshot, GameEvent, GameSession, OverReason, RngState, SessionState, speed_display,
};
pub use tick::{TickInput, tick};
