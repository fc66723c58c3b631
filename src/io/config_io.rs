use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read config.toml at `path`. A missing file yields the default config.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(&tmp.path().join("config.toml")).unwrap();
        assert!(config.store.dir.is_none());
        assert_eq!(config.store.quota_bytes, 5 * 1024 * 1024);
        assert!(config.ui.prefers_dark.is_none());
        assert!(config.ui.show_key_hints);
    }

    #[test]
    fn reads_all_sections() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r##"[store]
dir = "/tmp/tb-store"
quota_bytes = 1024

[ui]
prefers_dark = true
show_key_hints = false

[ui.dark_colors]
background = "#000000"

[ui.light_colors]
text = "#101010"
"##,
        )
        .unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.store.dir, Some(PathBuf::from("/tmp/tb-store")));
        assert_eq!(config.store.quota_bytes, 1024);
        assert_eq!(config.ui.prefers_dark, Some(true));
        assert!(!config.ui.show_key_hints);
        assert_eq!(
            config.ui.dark_colors.get("background").map(String::as_str),
            Some("#000000")
        );
        assert_eq!(
            config.ui.light_colors.get("text").map(String::as_str),
            Some("#101010")
        );
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[ui]\nprefers_dark = false\n").unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.ui.prefers_dark, Some(false));
        assert!(config.ui.show_key_hints);
        assert_eq!(config.store.quota_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[store\nquota_bytes = ").unwrap();
        assert!(matches!(
            read_config(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
