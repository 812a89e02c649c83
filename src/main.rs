//! calidad binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    calidad::cli::run()
}
