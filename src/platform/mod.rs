//! Platform abstraction layer
//!
//! The core never sniffs the environment. The host decides capabilities once
//! at startup and passes them in.

use serde::{Deserialize, Serialize};

/// Host-provided capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// Touch-oriented device: surface on-screen direction controls
    pub compact_input_mode: bool,
}

impl Capabilities {
    pub fn new(compact_input_mode: bool) -> Self {
        Self { compact_input_mode }
    }

    /// Device-class detection from the browser user agent (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Self {
        let agent = web_sys::window()
            .and_then(|w| w.navigator().user_agent().ok())
            .unwrap_or_default();
        let caps = Self::new(is_compact_user_agent(&agent));
        log::info!("Capabilities: {:?}", caps);
        caps
    }

    /// Native hosts have a keyboard
    #[cfg(not(target_arch = "wasm32"))]
    pub fn detect() -> Self {
        Self::default()
    }
}

/// Phones and tablets by user agent
pub fn is_compact_user_agent(agent: &str) -> bool {
    let agent = agent.to_lowercase();
    ["iphone", "ipad", "ipod", "android"]
        .iter()
        .any(|needle| agent.contains(needle))
}
