//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, every response is one JSON object per line on
//! stdout, errors included. Diagnostics always go to stderr.

use std::fmt::Display;
use std::io::{self, Stderr, Stdout, Write};

use serde::Serialize;

use crate::engine::Response;

/// Acknowledgement printed after a committed mutation.
pub const OK_MARKER: &str = "OK";

/// Prefix of every per-command error line.
pub const ERROR_PREFIX: &str = "Error, ";

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - no acknowledgements
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// How responses are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text, one line per response
    Text,
    /// One JSON object per response
    Json,
}

#[derive(Serialize)]
struct JsonReply<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<&'a Response>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Renders responses and errors to a pair of writers.
#[derive(Debug)]
pub struct Printer<O, E> {
    out: O,
    err: E,
    verbosity: Verbosity,
    format: OutputFormat,
}

impl Printer<Stdout, Stderr> {
    /// A printer over the process's stdout and stderr.
    pub fn stdio(verbosity: Verbosity, format: OutputFormat) -> Self {
        Self::new(io::stdout(), io::stderr(), verbosity, format)
    }
}

impl<O: Write, E: Write> Printer<O, E> {
    /// Create a printer over arbitrary writers.
    pub fn new(out: O, err: E, verbosity: Verbosity, format: OutputFormat) -> Self {
        Self {
            out,
            err,
            verbosity,
            format,
        }
    }

    /// The configured verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Print the result of a handled request.
    pub fn response(&mut self, response: &Response) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(&JsonReply {
                ok: true,
                response: Some(response),
                error: None,
            }),
            OutputFormat::Text => match response {
                Response::Done if self.verbosity == Verbosity::Quiet => Ok(()),
                Response::Done => writeln!(self.out, "{OK_MARKER}"),
                Response::Text(text) => writeln!(self.out, "{text}"),
                Response::Quit => Ok(()),
            },
        }
    }

    /// Print a failed request.
    pub fn failure(&mut self, error: impl Display) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(&JsonReply {
                ok: false,
                response: None,
                error: Some(error.to_string()),
            }),
            OutputFormat::Text => writeln!(self.err, "{ERROR_PREFIX}{error}"),
        }
    }

    /// Print a prompt without a line break.
    ///
    /// JSON output carries only reply objects, so no prompt is written there.
    pub fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            return Ok(());
        }
        write!(self.out, "{prompt}")?;
        self.out.flush()
    }

    /// Print a debug message (only in debug mode).
    pub fn debug(&mut self, message: impl Display) -> io::Result<()> {
        if self.verbosity == Verbosity::Debug {
            writeln!(self.err, "[debug] {message}")?;
        }
        Ok(())
    }

    /// Give back the underlying writers.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn json(&mut self, reply: &JsonReply<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, reply)?;
        writeln!(self.out)
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}
