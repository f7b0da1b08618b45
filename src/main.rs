//! Command-line entrypoint: `excerpt [LENGTH] [FORMAT] < page.html`.

use std::process::ExitCode;

use excerpt_formatter::start_excerpt_service;

/// Print the excerpt of the markup on stdin.
fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    start_excerpt_service::run_cli(&args)
}
