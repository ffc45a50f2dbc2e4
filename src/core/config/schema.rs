//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing so an unknown strategy name
//! fails at load time rather than at order time.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::order::Strategy;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// strategy = "weight"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Default ordering strategy ("weight" or "reach")
    pub strategy: Option<String>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_strategy(self.strategy.as_deref())
    }
}

/// Project configuration.
///
/// # Example
///
/// ```toml
/// strategy = "reach"
/// deps = ["deps.json", "vendor/deps.json"]
/// present = "stems.txt"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Ordering strategy override ("weight" or "reach")
    pub strategy: Option<String>,

    /// Default declaration file paths
    pub deps: Option<Vec<PathBuf>>,

    /// Default present-list path
    pub present: Option<PathBuf>,
}

impl ProjectConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_strategy(self.strategy.as_deref())
    }
}

fn validate_strategy(strategy: Option<&str>) -> Result<(), ConfigError> {
    if let Some(name) = strategy {
        name.parse::<Strategy>()
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
    }
    Ok(())
}
