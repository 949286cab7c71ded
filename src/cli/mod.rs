//! cli
//!
//! Command-line interface and text front end.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Parse command lines into engine requests ([`syntax`])
//! - Drive the read-eval loop ([`session`])
//! - Does NOT mutate the graph directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, resolves settings
//! from config and flags into a [`Context`], and dispatches to a command
//! handler. Every graph change flows through [`crate::engine`].

pub mod args;
pub mod commands;
pub mod session;
pub mod syntax;

pub use args::{Cli, Shell};

use anyhow::Result;

use crate::core::config::Config;
use crate::ui::output::{self, OutputFormat, Verbosity};
use session::SessionOptions;

/// Settings shared by every command, resolved from config and flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output verbosity.
    pub verbosity: Verbosity,
    /// Response format.
    pub format: OutputFormat,
    /// Prompt for the interactive shell.
    pub prompt: Option<String>,
    /// Stop `run` and `exec` at the first failure.
    pub fail_fast: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            format: OutputFormat::Text,
            prompt: None,
            fail_fast: false,
        }
    }
}

impl Context {
    /// Apply flags over config values.
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        let json = cli.json || config.json();
        Self {
            verbosity: Verbosity::from_flags(cli.quiet || config.quiet(), cli.debug),
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            prompt: config.prompt().map(str::to_string),
            fail_fast: config.fail_fast(),
        }
    }

    /// Options for the interactive shell: prompted, never fail-fast.
    pub fn shell_options(&self) -> SessionOptions {
        SessionOptions {
            prompt: self.prompt.clone(),
            fail_fast: false,
        }
    }

    /// Options for `run` and `exec`: no prompt, fail-fast from the flag or
    /// config.
    pub fn batch_options(&self, fail_fast_flag: bool) -> SessionOptions {
        SessionOptions {
            prompt: None,
            fail_fast: fail_fast_flag || self.fail_fast,
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let config = Config::load(cli.config.as_deref())?;
    let ctx = Context::resolve(&cli, &config);

    if cli.debug && ctx.verbosity == Verbosity::Quiet {
        output::warn("--debug has no effect in quiet mode", Verbosity::Normal);
    }
    if let Some(path) = config.loaded_from() {
        output::debug(
            format!("loaded config from {}", path.display()),
            ctx.verbosity,
        );
    }

    commands::dispatch(cli.command.unwrap_or(args::Command::Shell), &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{FileConfig, OutputDefaults, ScriptDefaults};
    use clap::Parser;

    fn config(json: bool, quiet: bool, fail_fast: bool) -> Config {
        Config::from_file_config(FileConfig {
            prompt: Some("> ".into()),
            output: Some(OutputDefaults {
                json: Some(json),
                quiet: Some(quiet),
            }),
            script: Some(ScriptDefaults {
                fail_fast: Some(fail_fast),
            }),
        })
    }

    #[test]
    fn config_supplies_defaults() {
        let cli = Cli::try_parse_from(["bpz"]).unwrap();
        let ctx = Context::resolve(&cli, &config(true, true, true));
        assert_eq!(ctx.format, OutputFormat::Json);
        assert_eq!(ctx.verbosity, Verbosity::Quiet);
        assert_eq!(ctx.prompt.as_deref(), Some("> "));
        assert!(ctx.batch_options(false).fail_fast);
    }

    #[test]
    fn shell_ignores_script_fail_fast() {
        let cli = Cli::try_parse_from(["bpz"]).unwrap();
        let ctx = Context::resolve(&cli, &config(false, false, true));
        let options = ctx.shell_options();
        assert!(!options.fail_fast);
        assert_eq!(options.prompt.as_deref(), Some("> "));
    }

    #[test]
    fn batch_never_prompts() {
        let cli = Cli::try_parse_from(["bpz"]).unwrap();
        let ctx = Context::resolve(&cli, &config(false, false, false));
        assert!(ctx.batch_options(true).prompt.is_none());
    }

    #[test]
    fn flags_enable_over_config() {
        let cli = Cli::try_parse_from(["bpz", "--json", "--debug"]).unwrap();
        let ctx = Context::resolve(&cli, &config(false, false, false));
        assert_eq!(ctx.format, OutputFormat::Json);
        assert_eq!(ctx.verbosity, Verbosity::Debug);
        assert!(!ctx.batch_options(false).fail_fast);
        assert!(ctx.batch_options(true).fail_fast);
    }

    #[test]
    fn default_context() {
        let ctx = Context::default();
        assert_eq!(ctx.format, OutputFormat::Text);
        assert_eq!(ctx.verbosity, Verbosity::Normal);
        assert!(ctx.prompt.is_none());
    }
}
