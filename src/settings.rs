//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web. Speed is the only rule a player
//! can change.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tick speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedPreset {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeedPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPreset::Slow => "Slow",
            SpeedPreset::Normal => "Normal",
            SpeedPreset::Fast => "Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(SpeedPreset::Slow),
            "normal" | "default" => Some(SpeedPreset::Normal),
            "fast" => Some(SpeedPreset::Fast),
            _ => None,
        }
    }

    /// Tick interval for this preset (ms)
    pub fn interval_ms(&self) -> u32 {
        match self {
            SpeedPreset::Slow => 200,
            SpeedPreset::Normal => DEFAULT_TICK_MS,
            SpeedPreset::Fast => 110,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Snake speed
    #[serde(default)]
    pub speed: SpeedPreset,
    /// Fixed RNG seed (random per page load when absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: SpeedPreset::Normal,
            seed: None,
        }
    }
}

impl Settings {
    pub fn tick_interval_ms(&self) -> u32 {
        self.speed.interval_ms()
    }

    /// Board side length; fixed
    pub fn grid_size(&self) -> u32 {
        GRID_SIZE
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse stored JSON, falling back to defaults on bad data
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "avoidance_snake_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("Failed to write settings");
                    } else {
                        log::info!("Settings saved");
                    }
                }
                Err(e) => log::warn!("Failed to encode settings: {}", e),
            }
        }
    }

    /// Native: read `AVOIDANCE_SNAKE_SETTINGS` JSON if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var("AVOIDANCE_SNAKE_SETTINGS") {
            Ok(json) => Self::from_json_or_default(&json),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!(SpeedPreset::from_str("FAST"), Some(SpeedPreset::Fast));
        assert_eq!(SpeedPreset::from_str("default"), Some(SpeedPreset::Normal));
        assert_eq!(SpeedPreset::from_str("ludicrous"), None);
        assert_eq!(SpeedPreset::Slow.as_str(), "Slow");
    }

    #[test]
    fn test_default_interval() {
        let settings = Settings::default();
        assert_eq!(settings.tick_interval_ms(), DEFAULT_TICK_MS);
        assert_eq!(settings.grid_size(), GRID_SIZE);
    }

    #[test]
    fn test_picked_preset_drives_next_interval() {
        let settings = Settings {
            speed: SpeedPreset::from_str("Fast").unwrap(),
            ..Settings::default()
        };
        assert_eq!(settings.tick_interval_ms(), 110);

        // Stored choice survives a reload
        let reloaded = Settings::from_json_or_default(&settings.to_json().unwrap());
        assert_eq!(reloaded.speed, SpeedPreset::Fast);
        assert_eq!(reloaded.tick_interval_ms(), 110);
    }

    #[test]
    fn test_json_round_trip_and_fallback() {
        let settings = Settings {
            speed: SpeedPreset::Fast,
            seed: Some(7),
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);

        // Missing fields take defaults
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
        assert_eq!(Settings::from_json_or_default("not json"), Settings::default());
    }
}
