use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tb", about = concat!("[x] tickbox v", env!("CARGO_PKG_VERSION"), " - a small to-do list for the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the persisted tasks and theme
    #[arg(long = "store-dir", global = true)]
    pub store_dir: Option<PathBuf>,

    /// Config file (default: the per-user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove all stored tasks (the theme preference is kept)
    Reset,
}
