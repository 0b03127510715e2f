//! JSON configuration file adapter.
//!
//! Implements [`ConfigPort`] over a single JSON document on disk.  Missing
//! keys take their defaults (see [`LoggerConfig`]); the loaded document is
//! validated before it is handed to the caller.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::{self, LoggerConfig};

/// Default configuration path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse and validate a configuration document held in memory.
pub fn parse(text: &str) -> Result<LoggerConfig, ConfigError> {
    let cfg: LoggerConfig =
        serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config::validate(&cfg)?;
    Ok(cfg)
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<LoggerConfig, ConfigError> {
        let text = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError,
        })?;
        let cfg = parse(&text)?;
        info!("JsonConfigFile: loaded {}", self.path.display());
        Ok(cfg)
    }
}
