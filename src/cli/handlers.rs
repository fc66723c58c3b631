use std::error::Error;

use crate::cli::commands::Cli;
use crate::io::config_io::{self, ConfigError};
use crate::io::kv::FileStore;
use crate::io::paths;
use crate::io::persistence::Persistence;
use crate::model::Config;

/// Read the config named by `--config`, or the per-user default.
pub fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(paths::default_config_path);
    config_io::read_config(&path)
}

/// Open the file store chosen by `--store-dir`, config, or the default location.
pub fn open_store(cli: &Cli, config: &Config) -> FileStore {
    let dir = paths::resolve_store_dir(cli.store_dir.as_deref(), config.store.dir.as_deref());
    FileStore::open(dir, Some(config.store.quota_bytes))
}

/// `tb` with no subcommand: run the TUI
pub fn cmd_tui(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let _log_guard = crate::logging::init_file_logging(&paths::log_dir());
    let config = load_config(cli)?;
    let store = open_store(cli, &config);
    tracing::info!("using store at {}", store.dir().display());
    crate::tui::run(config, Persistence::new(Box::new(store)))
}

/// `tb reset`: remove the stored task blob
pub fn cmd_reset(cli: &Cli) -> Result<(), Box<dyn Error>> {
    crate::logging::init_stderr_logging();
    let config = load_config(cli)?;
    let store = open_store(cli, &config);
    let dir = store.dir().to_path_buf();
    let mut persistence = Persistence::new(Box::new(store));
    persistence.try_clear()?;
    println!("Cleared stored tasks in {}", dir.display());
    Ok(())
}
