//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stemflow - order build artifacts by declared and implicit dependencies
#[derive(Parser, Debug)]
#[command(name = "stemflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if stemflow was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the emission order for present stems
    #[command(
        name = "order",
        long_about = "Compute the emission order for the present stems.\n\n\
            Reads dependency declarations, builds the dependency graph \
            (including implicit ancestor edges derived from stem naming), and \
            prints every present stem so that each one comes after everything \
            it depends on. Fails on dependency cycles and malformed stem names.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Order stems given on the command line
    sf order button button__icon base --deps deps.json

    # Read the present set from a file (one stem per line)
    sf order --present stems.txt --deps deps.json

    # Choose the reachability strategy and emit JSON
    sf order --present stems.txt --deps deps.json --strategy reach --json

PRESENT SET:
    Positional stems take precedence over --present. With neither, the
    'present' path from stemflow.toml is used."
    )]
    Order {
        /// Present stems in arrival order
        stems: Vec<String>,

        /// Read present stems from a file (one per line, # comments)
        #[arg(long, value_name = "FILE")]
        present: Option<PathBuf>,

        /// Declaration file(s); may be repeated
        #[arg(long = "deps", value_name = "FILE")]
        deps: Vec<PathBuf>,

        /// Ordering strategy: weight | reach
        #[arg(long, value_name = "STRATEGY")]
        strategy: Option<String>,
    },

    /// Show the naming decomposition and ancestor chain of a stem
    #[command(
        name = "inspect",
        long_about = "Parse a stem identifier and display its naming facets \
            and implicit ancestor chain.\n\n\
            Useful for checking how a compound identifier decomposes and which \
            implicit dependencies it will pick up during graph construction.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Decompose a compound identifier
    sf inspect button__icon_size_large

    # Machine-readable form
    sf inspect button__icon_size_large --json"
    )]
    Inspect {
        /// The stem identifier to decompose
        stem: String,
    },

    /// Show the direct dependencies of a stem
    #[command(
        name = "deps",
        long_about = "Show the direct dependencies of one stem: the normalized \
            declared dependencies from the given declaration files plus the \
            implicit ancestor derived from its naming.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Declared plus implicit dependencies
    sf deps button__icon --deps deps.json"
    )]
    Deps {
        /// The stem to query
        stem: String,

        /// Declaration file(s); may be repeated
        #[arg(long = "deps", value_name = "FILE")]
        deps: Vec<PathBuf>,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for stemflow \
            commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    sf completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    sf completion zsh >> ~/.zshrc

    # Fish
    sf completion fish > ~/.config/fish/completions/sf.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
