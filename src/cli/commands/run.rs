//! run command - Execute a script file

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::session::{LineMode, Session};
use crate::cli::Context;
use crate::ui::output::{self, Printer};

/// Run every line of `path` in one session.
pub fn run(ctx: &Context, path: &Path, fail_fast: bool) -> Result<()> {
    let file = File::open(path)
        .with_context(|| format!("failed to open script '{}'", path.display()))?;

    let mut session = Session::new(ctx.batch_options(fail_fast));
    let mut printer = Printer::stdio(ctx.verbosity, ctx.format);

    let summary = session
        .run(
            BufReader::new(file).lines(),
            LineMode::Script,
            &mut printer,
        )
        .with_context(|| format!("failed to read script '{}'", path.display()))?;

    output::debug(
        format!(
            "{}: {} command(s), {} failed",
            path.display(),
            summary.commands,
            summary.failures
        ),
        ctx.verbosity,
    );

    super::finish(summary)
}
