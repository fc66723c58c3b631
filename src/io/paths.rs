use std::path::{Path, PathBuf};

const APP_DIR: &str = "tickbox";

/// Per-user data directory: `$XDG_DATA_HOME/tickbox` or the platform equivalent.
/// Falls back to a relative `tickbox/` when the platform reports no home.
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(APP_DIR))
}

/// Default store directory: `{data_dir}/store`
pub fn default_store_dir() -> PathBuf {
    data_dir().join("store")
}

/// Log directory: `$XDG_STATE_HOME/tickbox/logs`, or `{data_dir}/logs` where
/// the platform has no state dir.
pub fn log_dir() -> PathBuf {
    dirs::state_dir()
        .map(|d| d.join(APP_DIR).join("logs"))
        .unwrap_or_else(|| data_dir().join("logs"))
}

/// Default config file: `$XDG_CONFIG_HOME/tickbox/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(APP_DIR))
        .join("config.toml")
}

/// Pick the store dir: explicit flag, then config, then the default.
pub fn resolve_store_dir(flag: Option<&Path>, configured: Option<&Path>) -> PathBuf {
    flag.or(configured)
        .map(Path::to_path_buf)
        .unwrap_or_else(default_store_dir)
}
