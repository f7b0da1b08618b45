//! Excerpt HTTP server binary.
//! Run with: cargo run --bin excerpt-server

use std::process::ExitCode;

use excerpt_formatter::start_excerpt_service;

fn main() -> ExitCode {
    start_excerpt_service::run()
}
