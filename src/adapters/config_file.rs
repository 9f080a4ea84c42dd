//! JSON configuration file adapter.
//!
//! Implements [`ConfigPort`].  A missing file is not an error: the oven
//! runs on defaults.  A present file is parsed, then range-checked before
//! anything else sees it.

use std::io::ErrorKind;
use std::path::PathBuf;

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::AppConfig;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<AppConfig, ConfigError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Config: {} not found, using defaults", self.path.display());
                return Ok(AppConfig::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config: AppConfig =
            serde_json::from_str(&text).map_err(|e| ConfigError::Corrupted(e.to_string()))?;
        config.validate()?;

        info!("Config loaded from {}", self.path.display());
        Ok(config)
    }
}
