use casemap_shared::config::{DEFAULT_PLAYBACK_INTERVAL_MS, MIN_PLAYBACK_INTERVAL_MS};
use gloo_storage::Storage;
use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "casemap_settings";

/// UI preferences that survive a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub show_legend: bool,
    pub playback_interval_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_legend: true,
            playback_interval_ms: DEFAULT_PLAYBACK_INTERVAL_MS,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        gloo_storage::LocalStorage::get::<Settings>(STORAGE_KEY)
            .unwrap_or_default()
            .sanitized()
    }

    pub fn save(&self) {
        if let Err(e) = gloo_storage::LocalStorage::set(STORAGE_KEY, self) {
            tracing::warn!(error = %e, "failed to persist settings");
        }
    }

    fn sanitized(mut self) -> Self {
        self.playback_interval_ms = self.playback_interval_ms.max(MIN_PLAYBACK_INTERVAL_MS);
        self
    }
}
