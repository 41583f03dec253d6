//! Presentation preferences
//!
//! The simulation never reads any of this. The frame driver feeds its
//! measured frame rate through `DetailMode::for_frame_rate` to pick a
//! rendering-detail hint, and the preferences persist through the host's
//! key/value store the same way the high score does.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Frame rate below which the draw pass should drop detail
pub const MIN_DETAIL_FRAME_RATE: f32 = 30.0;

/// Render quality hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DetailMode {
    Low,
    #[default]
    High,
}

impl DetailMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailMode::Low => "low detail",
            DetailMode::High => "high detail",
        }
    }

    /// Detail hint for a measured frame rate. The frame rate may influence
    /// nothing else; physics never keys off it.
    pub fn for_frame_rate(fps: f32) -> Self {
        if fps < MIN_DETAIL_FRAME_RATE {
            DetailMode::Low
        } else {
            DetailMode::High
        }
    }
}

/// Presentation preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Detail mode the draw pass starts in
    pub detail: DetailMode,
    /// Show the FPS counter in the HUD
    pub show_fps: bool,
    /// Minimize shake and flashes
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            detail: DetailMode::High,
            show_fps: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key in the host's key/value store
    const STORAGE_KEY: &'static str = "cloud_hopper_settings";

    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            if let Ok(settings) = serde_json::from_str(&json) {
                log::info!("loaded settings");
                return settings;
            }
            log::warn!("settings entry unreadable, using defaults");
        }
        Self::default()
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            if !store.set(Self::STORAGE_KEY, &json) {
                log::warn!("settings not persisted");
            }
        }
    }
}
