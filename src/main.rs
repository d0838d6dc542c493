//! Spritecut - Command-line tool for slicing sprite sheets into frame rectangles

use std::process::ExitCode;

use spritecut::cli;

fn main() -> ExitCode {
    // Log to stderr (if you run with `RUST_LOG=debug`)
    env_logger::init();
    cli::run()
}
