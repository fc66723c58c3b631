use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store directory override (default: the per-user data dir)
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Total bytes the store may hold across all keys. `0` disables the limit.
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            dir: None,
            quota_bytes: default_quota_bytes(),
        }
    }
}

/// 5 MiB, the common browser storage allowance per origin
fn default_quota_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Overrides the terminal-reported color scheme when no theme is stored
    #[serde(default)]
    pub prefers_dark: Option<bool>,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides for the dark palette
    #[serde(default)]
    pub dark_colors: HashMap<String, String>,
    /// Hex color overrides for the light palette
    #[serde(default)]
    pub light_colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            prefers_dark: None,
            show_key_hints: true,
            dark_colors: HashMap::new(),
            light_colors: HashMap::new(),
        }
    }
}
