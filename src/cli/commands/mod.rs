//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens its line source (stdin, a script, or arguments)
//! 2. Runs the lines through a [`Session`]
//! 3. Turns a fail-fast stop into an error for the exit status
//!
//! Handlers do NOT touch the graph directly.
//!
//! [`Session`]: crate::cli::session::Session

mod completion;
mod exec;
mod run;
mod shell;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use exec::exec;
pub use run::run;
pub use shell::shell;

use crate::cli::args::Command;
use crate::cli::session::SessionSummary;
use crate::cli::Context;
use anyhow::{bail, Result};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Shell => shell::shell(ctx),
        Command::Run { file, fail_fast } => run::run(ctx, &file, fail_fast),
        Command::Exec {
            commands,
            fail_fast,
        } => exec::exec(ctx, commands, fail_fast),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Map a finished session to the process result.
fn finish(summary: SessionSummary) -> Result<()> {
    if let Some(line) = summary.stopped_at {
        bail!(
            "stopped at line {line} after {} command(s)",
            summary.commands
        );
    }
    Ok(())
}
