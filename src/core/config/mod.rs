//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Stemflow has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Per-project overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$STEMFLOW_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/stemflow/config.toml`
//! 3. `<user config dir>/stemflow/config.toml`
//!
//! # Project Config Location
//!
//! `stemflow.toml` in the working directory.
//!
//! # Example
//!
//! ```no_run
//! use stemflow::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! if let Some(strategy) = config.strategy() {
//!     println!("Configured strategy: {}", strategy);
//! }
//! ```

pub mod schema;

pub use schema::{GlobalConfig, ProjectConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::order::Strategy;

/// File name of the project configuration.
pub const PROJECT_CONFIG_FILE: &str = "stemflow.toml";

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

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence automatically: project config
/// overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Project configuration (if a project file was found)
    pub project: Option<ProjectConfig>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `project_dir` is provided, also looks for `stemflow.toml` there.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or
    /// carry invalid values. Missing config files are not an error.
    pub fn load(project_dir: Option<&Path>) -> Result<Config, ConfigError> {
        let global = Self::load_global()?;
        let project = match project_dir {
            Some(dir) => Self::load_project(dir)?,
            None => None,
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        Ok(Config { global, project })
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<GlobalConfig, ConfigError> {
        // 1. Check $STEMFLOW_CONFIG
        if let Ok(path) = std::env::var("STEMFLOW_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::read_config(&path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/stemflow/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("stemflow/config.toml");
            if path.exists() {
                return Self::read_config(&path);
            }
        }

        // 3. Check the platform config dir
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("stemflow/config.toml");
            if path.exists() {
                return Self::read_config(&path);
            }
        }

        Ok(GlobalConfig::default())
    }

    /// Load project configuration from `stemflow.toml`, if present.
    fn load_project(dir: &Path) -> Result<Option<ProjectConfig>, ConfigError> {
        let path = dir.join(PROJECT_CONFIG_FILE);
        if !path.exists() {
            return Ok(None);
        }
        Self::read_config(&path).map(Some)
    }

    /// Read and parse one config file.
    fn read_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
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
    // Accessor methods with precedence
    // =========================================================================

    /// The configured ordering strategy, if any.
    pub fn strategy(&self) -> Option<Strategy> {
        self.project
            .as_ref()
            .and_then(|p| p.strategy.as_deref())
            .or(self.global.strategy.as_deref())
            // Validated at load time, so this parse cannot fail.
            .and_then(|s| s.parse().ok())
    }

    /// Declaration file paths from project config.
    pub fn deps(&self) -> &[PathBuf] {
        self.project
            .as_ref()
            .and_then(|p| p.deps.as_deref())
            .unwrap_or(&[])
    }

    /// Present-list path from project config.
    pub fn present(&self) -> Option<&Path> {
        self.project.as_ref().and_then(|p| p.present.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_empty_defaults() {
        std::env::remove_var("STEMFLOW_CONFIG");

        let config = Config::load(None).unwrap();
        assert!(config.deps().is_empty());
        assert!(config.present().is_none());
    }

    #[test]
    fn load_project_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG_FILE),
            r#"
            strategy = "reach"
            deps = ["deps.json", "extra.json"]
            present = "stems.txt"
            "#,
        )
        .unwrap();

        let config = Config::load(Some(temp.path())).unwrap();
        assert_eq!(config.strategy(), Some(Strategy::Reachability));
        assert_eq!(config.deps().len(), 2);
        assert_eq!(config.present(), Some(Path::new("stems.txt")));
    }

    #[test]
    fn missing_project_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(Some(temp.path())).unwrap();
        assert!(config.project.is_none());
    }

    #[test]
    fn invalid_strategy_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG_FILE),
            "strategy = \"alphabetical\"",
        )
        .unwrap();

        assert!(Config::load(Some(temp.path())).is_err());
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG_FILE),
            "unknown_field = true",
        )
        .unwrap();

        assert!(Config::load(Some(temp.path())).is_err());
    }

    #[test]
    fn precedence_project_overrides_global() {
        let config = Config {
            global: GlobalConfig {
                strategy: Some("weight".to_string()),
            },
            project: Some(ProjectConfig {
                strategy: Some("reach".to_string()),
                ..Default::default()
            }),
        };

        assert_eq!(config.strategy(), Some(Strategy::Reachability));
    }
}
