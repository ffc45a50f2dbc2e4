//! cli
//!
//! Command-line interface layer for stemflow.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Does NOT perform graph construction or ordering directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! command handlers, which gather inputs through [`crate::source`] and run
//! the pure engine in [`crate::core`] and [`crate::order`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::Result;

use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command
/// behavior.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Output verbosity.
    pub verbosity: Verbosity,
    /// Machine-readable JSON output.
    pub json: bool,
}

impl Context {
    /// The working directory for config lookup and relative paths.
    pub fn working_dir(&self) -> PathBuf {
        self.cwd.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve a possibly-relative path against the working directory.
    pub fn resolve(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            self.working_dir().join(path)
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            verbosity: Verbosity::Normal,
            json: false,
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        cwd: cli.cwd.clone(),
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        json: cli.json,
    };

    // Dispatch to command handler
    commands::dispatch(cli.command, &ctx)
}
