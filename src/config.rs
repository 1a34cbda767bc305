//! Optional JSON config for the daemon.
//!
//! Missing or unparseable files silently fall back to defaults; a config
//! file should never stop the HUD from starting.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

const CONFIG_DIR: &str = ".config/playerhud";

/// Floor for the poll interval so a typo cannot hammer the bus.
const MIN_POLL_INTERVAL_MS: u64 = 250;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Sync cadence in milliseconds.
    pub poll_interval_ms: u64,
    /// Override for the artwork cache slot.
    pub cache_path: Option<PathBuf>,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            cache_path: None,
        }
    }
}

impl HudConfig {
    /// Load from a config file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(CONFIG_DIR).join("config.json")
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}
