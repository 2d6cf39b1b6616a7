//! Configuration for the roster server.
//!
//! Configuration is loaded from `roster.json` in the working directory
//! (or an explicit path). A missing file yields defaults; an invalid
//! file is an error.

use std::path::Path;

use serde::{Deserialize, Serialize};

use roster_store::error::{Result, RosterError};

/// Name of the configuration file.
const CONFIG_FILE_NAME: &str = "roster.json";

/// Default path for the student records data file.
fn default_data_file() -> String {
    "students.json".to_string()
}

/// Default port for the HTTP API server.
const fn default_port() -> u16 {
    5000
}

/// Server configuration.
///
/// All fields have defaults, so an empty `roster.json` (or none at
/// all) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Path to the JSON file holding the student records.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Port for the HTTP API server.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Loads configuration from the current working directory.
    ///
    /// Looks for `roster.json` in the current directory. If found,
    /// loads and validates the configuration. If not found, returns
    /// default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but contains invalid JSON.
    pub fn load() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            RosterError::config_parse(
                "<current directory>",
                format!("cannot determine current directory: {e}"),
            )
        })?;
        Self::load_from_dir(&current_dir)
    }

    /// Loads configuration from a specific directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but contains invalid JSON.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        Self::load_from_file(&config_path)
    }

    /// Loads configuration from a specific file path.
    ///
    /// If the file does not exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::ConfigParse` if the file exists but
    /// contains invalid JSON, or `RosterError::ConfigValidation` if
    /// the configuration values are invalid.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(e) => {
                return Err(RosterError::config_parse(
                    path,
                    format!("failed to read file: {e}"),
                ));
            }
        };

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| RosterError::config_parse(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::ConfigValidation` if `data_file` is empty
    /// or `port` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.data_file.trim().is_empty() {
            return Err(RosterError::config_validation(
                "dataFile must not be empty",
                "Provide a valid data file path in your roster.json",
            ));
        }

        if self.port == 0 {
            return Err(RosterError::config_validation(
                "port must be greater than 0",
                "Set port to a valid TCP port in your roster.json",
            ));
        }

        Ok(())
    }
}
