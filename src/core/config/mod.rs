//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order; the first existing file wins:
//! 1. Explicit path passed by the caller (`--config`)
//! 2. `$BLUEPRINTZ_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/blueprintz/config.toml`
//! 4. `~/.blueprintz/config.toml`
//!
//! A missing file is not an error. An explicit path that does not exist is.
//!
//! # Example
//!
//! ```no_run
//! use blueprintz::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("JSON output: {}", config.json());
//! println!("Prompt: {:?}", config.prompt());
//! ```

pub mod schema;

pub use schema::{FileConfig, OutputDefaults, ScriptDefaults};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "BLUEPRINTZ_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file '{0}' does not exist")]
    Missing(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration with defaults applied by the accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents
    pub file: FileConfig,
    /// Path the file was loaded from
    path: Option<PathBuf>,
}

impl Config {
    /// Wrap already-parsed values that did not come from a file.
    pub fn from_file_config(file: FileConfig) -> Self {
        Self { file, path: None }
    }

    /// Load configuration.
    ///
    /// `explicit` takes precedence over the search locations and must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigError::Missing(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::search(),
        };

        let Some(path) = path else {
            return Ok(Self::default());
        };

        let file = Self::read_config(&path)?;
        file.validate()?;

        Ok(Self {
            file,
            path: Some(path),
        })
    }

    /// Find the first existing config file in the standard locations.
    fn search() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("blueprintz/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".blueprintz/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Prompt for the interactive shell.
    ///
    /// Defaults to no prompt, so piped transcripts stay clean.
    pub fn prompt(&self) -> Option<&str> {
        self.file.prompt.as_deref()
    }

    /// Check if responses should be JSON.
    ///
    /// Defaults to `false`.
    pub fn json(&self) -> bool {
        self.file.output.as_ref().and_then(|o| o.json).unwrap_or(false)
    }

    /// Check if `OK` acknowledgements are suppressed.
    ///
    /// Defaults to `false`.
    pub fn quiet(&self) -> bool {
        self.file
            .output
            .as_ref()
            .and_then(|o| o.quiet)
            .unwrap_or(false)
    }

    /// Check if scripts stop at the first error.
    ///
    /// Defaults to `false`.
    pub fn fail_fast(&self) -> bool {
        self.file
            .script
            .as_ref()
            .and_then(|s| s.fail_fast)
            .unwrap_or(false)
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
