//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Gathers inputs and runs the engine
//! 3. Formats and displays output
//!
//! # Async Input Gathering
//!
//! Commands that read declaration files and present lists gather both
//! inputs concurrently. Handlers are synchronous and own a tokio runtime
//! for the gathering step; the engine itself never suspends.

mod completion;
mod deps_cmd;
mod inspect;
mod order_cmd;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use deps_cmd::deps;
pub use inspect::inspect;
pub use order_cmd::order;

use anyhow::Result;

use super::Context;
use crate::cli::args::Command;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Order {
            stems,
            present,
            deps,
            strategy,
        } => order_cmd::order(ctx, stems, present, deps, strategy),
        Command::Inspect { stem } => inspect::inspect(ctx, &stem),
        Command::Deps { stem, deps } => deps_cmd::deps(ctx, &stem, deps),
        Command::Completion { shell } => completion::completion(shell),
    }
}
