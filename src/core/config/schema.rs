//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order of precedence:
//! 1. `--config <path>` on the command line
//! 2. `$BLUEPRINTZ_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/blueprintz/config.toml`
//! 4. `~/.blueprintz/config.toml` (canonical location)
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., the prompt must fit on
//! one line).

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// User configuration.
///
/// # Example
///
/// ```toml
/// prompt = "bpz> "
///
/// [output]
/// json = false
/// quiet = false
///
/// [script]
/// fail_fast = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Prompt shown before each line in the interactive shell
    pub prompt: Option<String>,

    /// Response formatting defaults
    pub output: Option<OutputDefaults>,

    /// Script execution defaults
    pub script: Option<ScriptDefaults>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prompt) = &self.prompt {
            if prompt.chars().any(|c| c.is_control()) {
                return Err(ConfigError::InvalidValue(
                    "prompt cannot contain control characters".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Response formatting defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputDefaults {
    /// Emit one JSON object per response
    pub json: Option<bool>,

    /// Suppress `OK` acknowledgements
    pub quiet: Option<bool>,
}

/// Script execution defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptDefaults {
    /// Stop at the first failing line
    pub fail_fast: Option<bool>,
}
