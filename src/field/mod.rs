//! Field values and text formats consumed by the formatters.

pub mod format;
pub mod item;

pub use format::{FALLBACK_FORMAT, FormatCatalog, FormatResolver, TextFormat};
pub use item::{FieldType, TextFieldValue};
