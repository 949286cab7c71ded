use std::process::ExitCode;

use blueprintz::ui::output;

fn main() -> ExitCode {
    match blueprintz::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
