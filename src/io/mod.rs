pub mod config_io;
pub mod kv;
pub mod paths;
pub mod persistence;
pub mod system_theme;
