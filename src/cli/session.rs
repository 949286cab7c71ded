//! cli::session
//!
//! The read-eval loop: one line in, one response out.
//!
//! # Lifecycle
//!
//! ```text
//! read line -> parse -> GraphManager::handle -> print
//! ```
//!
//! A line is fully handled before the next one is read. Errors are printed
//! and the loop continues unless fail-fast is set. `quit` or end of input
//! ends the loop.

use std::io::{self, Write};

use thiserror::Error;

use super::syntax::{parse_line, ParseError};
use crate::engine::{GraphError, GraphManager, Response};
use crate::ui::output::{Printer, Verbosity};

/// Comment marker for script lines.
pub const COMMENT_PREFIX: char = '#';

/// A line that could not be handled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Where lines come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// Typed by a user; every line is a command and the prompt is shown.
    Interactive,
    /// Read from a script; blank lines and `#` comments are skipped.
    Script,
    /// Given up front; every line is a command and no prompt is shown.
    Batch,
}

/// Session settings resolved from config and flags.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Prompt shown before each interactive line
    pub prompt: Option<String>,
    /// Stop at the first failing line
    pub fail_fast: bool,
}

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Lines handled (skipped lines excluded)
    pub commands: usize,
    /// Lines that produced an error
    pub failures: usize,
    /// Line number of the failure that stopped a fail-fast run
    pub stopped_at: Option<usize>,
    /// Whether the run ended with `quit`
    pub quit: bool,
}

enum Step {
    Continue,
    Failed,
    Quit,
}

/// A session owning one assembly graph.
#[derive(Debug, Default)]
pub struct Session {
    manager: GraphManager,
    options: SessionOptions,
}

impl Session {
    /// Create a session with an empty graph.
    pub fn new(options: SessionOptions) -> Self {
        Self {
            manager: GraphManager::new(),
            options,
        }
    }

    /// Handle lines until `quit`, end of input, or a fail-fast stop.
    pub fn run<I, O, E>(
        &mut self,
        lines: I,
        mode: LineMode,
        printer: &mut Printer<O, E>,
    ) -> io::Result<SessionSummary>
    where
        I: IntoIterator<Item = io::Result<String>>,
        O: Write,
        E: Write,
    {
        let mut summary = SessionSummary::default();
        let mut lines = lines.into_iter().enumerate();

        loop {
            if mode == LineMode::Interactive {
                if let Some(prompt) = self.options.prompt.as_deref() {
                    printer.prompt(prompt)?;
                }
            }

            let Some((index, raw)) = lines.next() else {
                break;
            };
            let raw = raw?;
            let line = raw.strip_suffix('\r').unwrap_or(&raw);

            if mode == LineMode::Script && is_skippable(line) {
                continue;
            }

            summary.commands += 1;
            match self.step(line, printer)? {
                Step::Continue => {}
                Step::Failed => {
                    summary.failures += 1;
                    if self.options.fail_fast {
                        summary.stopped_at = Some(index + 1);
                        break;
                    }
                }
                Step::Quit => {
                    summary.quit = true;
                    break;
                }
            }
        }

        Ok(summary)
    }

    fn step<O: Write, E: Write>(
        &mut self,
        line: &str,
        printer: &mut Printer<O, E>,
    ) -> io::Result<Step> {
        match self.execute(line, printer)? {
            Ok(Response::Quit) => {
                printer.response(&Response::Quit)?;
                Ok(Step::Quit)
            }
            Ok(response) => {
                printer.response(&response)?;
                Ok(Step::Continue)
            }
            Err(err) => {
                printer.failure(&err)?;
                Ok(Step::Failed)
            }
        }
    }

    /// Parse and handle one line, logging the graph fingerprint around
    /// mutations in debug mode.
    fn execute<O: Write, E: Write>(
        &mut self,
        line: &str,
        printer: &mut Printer<O, E>,
    ) -> io::Result<Result<Response, CommandError>> {
        let request = match parse_line(line) {
            Ok(request) => request,
            Err(err) => return Ok(Err(err.into())),
        };

        let logged = printer.verbosity() == Verbosity::Debug && request.is_mutation();
        let before = logged.then(|| self.manager.fingerprint());

        let result = self.manager.handle(request).map_err(CommandError::from);

        if let Some(before) = before {
            let after = self.manager.fingerprint();
            let state = if after == before { "unchanged" } else { "committed" };
            printer.debug(format_args!(
                "{line:?}: graph {state} ({} -> {}, {} parts)",
                before.short(),
                after.short(),
                self.manager.graph().len()
            ))?;
        }

        Ok(result)
    }
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX)
}
