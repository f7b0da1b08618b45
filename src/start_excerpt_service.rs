//! Startup helpers for the excerpt binaries.

use std::io::{Read, Write};
use std::process::ExitCode;

use crate::config::ServiceConfig;
use crate::field::{FormatCatalog, FormatResolver};
use crate::server::{self, AppState};
use crate::trimming::trim;

/// Initialise logging: `RUST_LOG` directives on top of INFO, written to stderr.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

/// Run the HTTP server (used by the `excerpt-server` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    init_tracing();

    tracing::info!("Starting excerpt service v{}", env!("CARGO_PKG_VERSION"));

    let config = match ServiceConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            return ExitCode::from(1);
        }
    };
    tracing::info!("Default trim length: {}", config.default_trim_length);

    let state = match AppState::new(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to create state: {e}");
            return ExitCode::from(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = rt.block_on(server::run_server(state)) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Trim markup read from stdin and print the excerpt (used by the `excerpt` binary).
///
/// `args` are `[LENGTH] [FORMAT]`; the length defaults to the configured one.
#[must_use]
pub fn run_cli(args: &[String]) -> ExitCode {
    init_tracing();

    let config = match ServiceConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            return ExitCode::from(2);
        }
    };

    let length = match args.first() {
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                tracing::error!("LENGTH must be a positive integer, got {raw:?}");
                return ExitCode::from(2);
            }
        },
        None => config.default_settings().trim_length(),
    };

    let formats = FormatCatalog::with_defaults();
    let format = args.get(1).map(|id| formats.resolve(id));

    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut input) {
        tracing::error!("Failed to read stdin: {e}");
        return ExitCode::from(1);
    }

    let summary = trim(&input, length, format);
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", summary.text) {
        tracing::error!("Failed to write output: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
