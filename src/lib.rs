//! Excerpt field formatter: trimmed, markup-free summaries of rich-text fields.

// Safety and documentation
#![deny(unsafe_code)] // No unsafe code anywhere in the crate
#![deny(missing_docs)] // Every public item is documented
#![deny(nonstandard_style)]
#![deny(unused_must_use)] // Results and Options must be handled
#![forbid(unsafe_op_in_unsafe_fn)]
// Clippy discipline
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::unwrap_used)] // No unwrap()
#![deny(clippy::expect_used)] // No expect()
#![deny(clippy::panic)] // No panic!()
#![deny(clippy::print_stdout)] // Binaries own stdout
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::redundant_clone)]
#![deny(clippy::shadow_unrelated)]
#![deny(clippy::cognitive_complexity)]
#![deny(overflowing_literals)]

/// Service configuration.
pub mod config;
/// Error types.
pub mod error;
/// Field values and text formats.
pub mod field;
/// Field formatters, render nodes, registry and settings.
pub mod formatter;
/// HTTP server and API routes.
#[allow(clippy::missing_errors_doc, clippy::unused_async)]
pub mod server;
/// Entry helpers for the binaries.
pub mod start_excerpt_service;
/// Summary trimming.
pub mod trimming;

pub use error::{ExcerptError, ExcerptResult};
pub use field::{FieldType, TextFieldValue, TextFormat};
pub use formatter::{ExcerptFormatter, ExcerptSettings, FieldFormatter, FormatterRegistry};
pub use trimming::{RenderedSummary, TRUNCATION_MARKER, trim};
