//! Productivity Avoidance Snake
//!
//! Core modules:
//! - `sim`: Deterministic snake simulation (grid, body, apples, session state)
//! - `engine`: Tick engine tying the timer, intent slot and renderer together
//! - `input`: Keyboard/touch normalization
//! - `evasion`: The unclickable button
//! - `renderer`: Render adapter boundary (text, canvas on web)
//! - `platform`: Host capabilities

pub mod engine;
pub mod evasion;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use engine::{TickEngine, TimerHandle};
pub use evasion::{EvasionState, EvasiveTarget};
pub use input::InputEvent;
pub use platform::Capabilities;
pub use settings::{Settings, SpeedPreset};

/// Game configuration constants
pub mod consts {
    /// Cells per board side
    pub const GRID_SIZE: u32 = 20;
    /// Default tick interval (ms)
    pub const DEFAULT_TICK_MS: u32 = 150;
    /// Points per apple
    pub const APPLE_SCORE: u64 = 10;

    /// Interval that shows as speed 0 on the HUD (ms)
    pub const SPEED_DISPLAY_BASE_MS: u32 = 200;
    /// Interval change per HUD speed point (ms)
    pub const SPEED_DISPLAY_STEP_MS: u32 = 15;

    /// Clicks the button dodges before giving up
    pub const SURRENDER_AFTER_CLICKS: u32 = 3;
    /// How long the button stays surrendered (ms)
    pub const SURRENDER_REVERT_MS: f64 = 2000.0;
    /// Rotation jitter while dodging the pointer (degrees, +/-)
    pub const POINTER_JITTER_DEG: f32 = 10.0;
}

/// Bucket a pointer angle (degrees, as returned by atan2) into one of 8 sectors
///
/// Sector 0 is centered on 180 degrees (pointer directly left of the target).
#[inline]
pub fn angle_to_sector(angle_deg: f32) -> usize {
    (((angle_deg + 180.0 + 22.5) / 45.0).floor() as i32).rem_euclid(8) as usize
}
