//! exec command - Run command lines given as arguments

use std::io;

use anyhow::Result;

use crate::cli::session::{LineMode, Session};
use crate::cli::Context;
use crate::ui::output::Printer;

/// Run each argument as one command line, in order, in one session.
pub fn exec(ctx: &Context, commands: Vec<String>, fail_fast: bool) -> Result<()> {
    let mut session = Session::new(ctx.batch_options(fail_fast));
    let mut printer = Printer::stdio(ctx.verbosity, ctx.format);

    let summary = session.run(
        commands.into_iter().map(Ok::<_, io::Error>),
        LineMode::Batch,
        &mut printer,
    )?;

    super::finish(summary)
}
