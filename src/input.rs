//! Input normalization
//!
//! Keyboard keys and on-screen touch controls both map onto the same small
//! event vocabulary. Nothing here touches game state.

use serde::{Deserialize, Serialize};

use crate::platform::Capabilities;
use crate::sim::{Direction, SessionState};

/// Normalized input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    TogglePause,
}

impl InputEvent {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(InputEvent::Up),
            "ArrowDown" | "s" | "S" => Some(InputEvent::Down),
            "ArrowLeft" | "a" | "A" => Some(InputEvent::Left),
            "ArrowRight" | "d" | "D" => Some(InputEvent::Right),
            " " | "p" | "P" | "Escape" => Some(InputEvent::TogglePause),
            _ => None,
        }
    }

    /// Map an on-screen touch control id
    pub fn from_touch_control(id: &str) -> Option<Self> {
        match id {
            "touch-up" => Some(InputEvent::Up),
            "touch-down" => Some(InputEvent::Down),
            "touch-left" => Some(InputEvent::Left),
            "touch-right" => Some(InputEvent::Right),
            "touch-pause" => Some(InputEvent::TogglePause),
            _ => None,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            InputEvent::Up => Some(Direction::Up),
            InputEvent::Down => Some(Direction::Down),
            InputEvent::Left => Some(Direction::Left),
            InputEvent::Right => Some(Direction::Right),
            InputEvent::TogglePause => None,
        }
    }
}

/// Keys whose default browser action (page scroll) must be suppressed
pub fn is_scroll_key(key: &str) -> bool {
    matches!(key, "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | " ")
}

/// Touch ids in the order the control pad lays them out
pub const TOUCH_CONTROL_IDS: [&str; 5] = [
    "touch-up",
    "touch-left",
    "touch-pause",
    "touch-right",
    "touch-down",
];

/// Whether the on-screen pad should be visible
pub fn show_touch_controls(caps: &Capabilities, state: SessionState) -> bool {
    caps.compact_input_mode && state == SessionState::Running
}

/// Whether the keyboard legend should be visible
pub fn show_keyboard_legend(caps: &Capabilities) -> bool {
    !caps.compact_input_mode
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_mapping() {
        assert_eq!(InputEvent::from_key("ArrowUp"), Some(InputEvent::Up));
        assert_eq!(InputEvent::from_key("d"), Some(InputEvent::Right));
        assert_eq!(InputEvent::from_key(" "), Some(InputEvent::TogglePause));
        assert_eq!(InputEvent::from_key("Enter"), None);
    }

    #[test]
    fn test_touch_and_keyboard_share_vocabulary() {
        for id in TOUCH_CONTROL_IDS {
            assert!(InputEvent::from_touch_control(id).is_some(), "{id}");
        }
        assert_eq!(
            InputEvent::from_touch_control("touch-left"),
            InputEvent::from_key("ArrowLeft")
        );
        assert_eq!(InputEvent::from_touch_control("nope"), None);
    }

    #[test]
    fn test_directions() {
        assert_eq!(InputEvent::Down.direction(), Some(Direction::Down));
        assert_eq!(InputEvent::TogglePause.direction(), None);
    }

    #[test]
    fn test_scroll_keys() {
        assert!(is_scroll_key(" "));
        assert!(is_scroll_key("ArrowDown"));
        assert!(!is_scroll_key("w"));
    }

    #[test]
    fn test_touch_pad_visibility() {
        let touch = Capabilities::new(true);
        let desktop = Capabilities::new(false);
        assert!(show_touch_controls(&touch, SessionState::Running));
        assert!(!show_touch_controls(&touch, SessionState::Paused));
        assert!(!show_touch_controls(&desktop, SessionState::Running));
        assert!(show_keyboard_legend(&desktop));
        assert!(!show_keyboard_legend(&touch));
    }
}
