//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Load configuration from this file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Suppress `OK` acknowledgements
//! - `--json`: One JSON object per response

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bpz - an interactive bill-of-materials shell
#[derive(Parser, Debug)]
#[command(name = "bpz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load configuration from this file instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress OK acknowledgements
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print one JSON object per response
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
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
    /// Read commands from stdin until quit (default)
    #[command(
        name = "shell",
        long_about = "Read commands from stdin until `quit` or end of input.\n\n\
            Each line is one command. Successful changes print OK, queries print \
            their result, and errors print a line starting with 'Error,' without \
            ending the session.",
        after_help = "\
COMMANDS:
    addAssembly NAME=AMOUNT:NAME;AMOUNT:NAME...
    removeAssembly NAME
    printAssembly NAME
    getAssemblies NAME
    getComponents NAME
    addPart NAME+AMOUNT:NAME
    removePart NAME-AMOUNT:NAME
    quit

EXAMPLE:
    $ bpz
    addAssembly Bike=2:Wheel;1:Frame
    OK
    getComponents Bike
    Wheel:2;Frame:1"
    )]
    Shell,

    /// Run a script file, one command per line
    #[command(
        name = "run",
        long_about = "Run a script file, one command per line.\n\n\
            Blank lines and lines starting with '#' are skipped.",
        after_help = "\
EXAMPLES:
    # Run a script, reporting errors and carrying on
    bpz run bike.bom

    # Stop at the first failing line
    bpz run bike.bom --fail-fast"
    )]
    Run {
        /// Script to run
        file: PathBuf,

        /// Stop at the first failing line and exit non-zero
        #[arg(long)]
        fail_fast: bool,
    },

    /// Run each argument as one command in a single session
    #[command(
        name = "exec",
        after_help = "\
EXAMPLE:
    bpz exec 'addAssembly Bike=2:Wheel' 'getComponents Bike'"
    )]
    Exec {
        /// Command lines to run in order
        #[arg(required = true, value_name = "COMMAND")]
        commands: Vec<String>,

        /// Stop at the first failing command and exit non-zero
        #[arg(long)]
        fail_fast: bool,
    },

    /// Generate shell completion scripts
    #[command(name = "completion")]
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
