//! shell command - Interactive read-eval loop over stdin

use std::io;

use anyhow::{Context as _, Result};

use crate::cli::session::{LineMode, Session};
use crate::cli::Context;
use crate::ui::output::Printer;

/// Read commands from stdin until `quit` or end of input.
pub fn shell(ctx: &Context) -> Result<()> {
    let mut session = Session::new(ctx.shell_options());
    let mut printer = Printer::stdio(ctx.verbosity, ctx.format);

    let summary = session
        .run(io::stdin().lines(), LineMode::Interactive, &mut printer)
        .context("failed to read from stdin")?;

    super::finish(summary)
}
