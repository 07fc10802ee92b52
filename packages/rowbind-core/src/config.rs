//! Binding configuration.
//!
//! Supports JSON config files, environment variable overrides, and defaults.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BindError;

/// Treatment of boolean text other than `true`/`false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanPolicy {
    /// Anything but a case-insensitive `true` decodes to `false`
    #[default]
    Lenient,
    /// Only `true`/`false` (any case) decode; other text is an error
    Strict,
}

impl std::str::FromStr for BooleanPolicy {
    type Err = BindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(BooleanPolicy::Lenient),
            "strict" => Ok(BooleanPolicy::Strict),
            _ => Err(BindError::Config(format!("Invalid boolean policy: {}", s))),
        }
    }
}

/// Per-field decoding options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    /// Whether an empty buffer may write null (default: true)
    pub allow_null: bool,
    /// Whether an empty buffer writes `""` to character columns instead of null (default: false)
    pub allow_empty_string: bool,
    /// Boolean decoding policy (default: lenient)
    pub boolean_policy: BooleanPolicy,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            allow_null: true,
            allow_empty_string: false,
            boolean_policy: BooleanPolicy::Lenient,
        }
    }
}

/// Binding configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    /// Options applied to fields that do not override them
    pub defaults: FieldOptions,
}

impl BindConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, BindError> {
        serde_json::from_str(json).map_err(|e| BindError::Config(format!("Invalid JSON: {}", e)))
    }

    /// Loads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BindError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| BindError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_json_str(&content)
    }

    /// Applies environment variable overrides.
    ///
    /// Variables are prefixed with `ROWBIND_`, e.g. `ROWBIND_ALLOW_NULL=false`
    /// overrides `defaults.allow_null`.
    pub fn apply_env_overrides(&mut self) -> Result<(), BindError> {
        if let Ok(val) = env::var("ROWBIND_ALLOW_NULL") {
            self.defaults.allow_null = val
                .parse()
                .map_err(|_| BindError::Config(format!("Invalid allow_null: {}", val)))?;
        }
        if let Ok(val) = env::var("ROWBIND_ALLOW_EMPTY_STRING") {
            self.defaults.allow_empty_string = val
                .parse()
                .map_err(|_| BindError::Config(format!("Invalid allow_empty_string: {}", val)))?;
        }
        if let Ok(val) = env::var("ROWBIND_BOOLEAN_POLICY") {
            self.defaults.boolean_policy = val.parse()?;
        }
        Ok(())
    }
}
