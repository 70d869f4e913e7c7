//! Configuration, read from TOML. Every field has a default, so an empty file
//! (or no file at all) is a valid configuration.
//!
//! ```toml
//! [storage]
//! data_dir = "./pricebook-data"
//!
//! [store]
//! write_mode = "serialized"
//!
//! [display]
//! currency_symbol = "$"
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculator::DEFAULT_CURRENCY_SYMBOL;
use crate::collection::WriteMode;
use crate::theme::DEFAULT_THEME_KEY;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub store: StoreConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Where and under which keys data is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for the file-backed adapter.
    pub data_dir: PathBuf,
    pub products_key: String,
    pub due_bills_key: String,
    pub theme_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub write_mode: WriteMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set (e.g. `info`,
    /// `pricebook=debug`).
    pub level: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./pricebook-data"),
            products_key: "products".to_string(),
            due_bills_key: "dueBills".to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Like [`Config::from_file`], but a missing file means defaults.
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::from_file(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage.products_key, "products");
        assert_eq!(config.storage.due_bills_key, "dueBills");
        assert_eq!(config.storage.theme_key, "theme");
        assert_eq!(config.store.write_mode, WriteMode::Overlapping);
        assert_eq!(config.display.currency_symbol, "৳");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [store]
            write_mode = "serialized"

            [display]
            currency_symbol = "$"
            "#,
        )
        .unwrap();
        assert_eq!(config.store.write_mode, WriteMode::Serialized);
        assert_eq!(config.display.currency_symbol, "$");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn unknown_write_mode_is_an_error() {
        let err = Config::from_toml_str("[store]\nwrite_mode = \"eventually\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn file_loading() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[storage]\ndata_dir = \"/tmp/pb\"").unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/pb"));

        let missing = file.path().with_extension("missing");
        assert_eq!(Config::from_file_or_default(&missing).unwrap(), Config::default());
        assert!(matches!(Config::from_file(&missing), Err(ConfigError::Io { .. })));
    }
}
