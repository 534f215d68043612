use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};

use crate::movement::MovementTuning;

pub const STORAGE_KEY: &str = "mario_controls_settings";

/// Player-facing options, persisted as JSON in localStorage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    pub haptics: bool,
    pub haptic_pulse_ms: u32,
    /// Mount the overlay even when no touch support is detected.
    pub force_overlay: bool,
    pub movement: MovementTuning,
    /// Console verbosity, e.g. `"debug"` to see touch bookkeeping.
    pub log_level: LevelFilter,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            haptics: true,
            haptic_pulse_ms: 10,
            force_overlay: false,
            movement: MovementTuning::default(),
            log_level: LevelFilter::Info,
        }
    }
}

impl ControlSettings {
    /// Pulse length handed to the touch controller, `None` when disabled.
    pub fn pulse_ms(&self) -> Option<u32> {
        (self.haptics && self.haptic_pulse_ms > 0).then_some(self.haptic_pulse_ms)
    }

    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(s) => s,
            Err(e) => {
                warn!("ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(STORAGE_KEY) {
                    return Self::from_json(&raw);
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(s) = serde_json::to_string(self) {
                    let _ = store.set_item(STORAGE_KEY, &s);
                }
            }
        }
    }
}
