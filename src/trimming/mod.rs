//! Summary trimming: the plain-text excerpt of a rich-text value.
//!
//! - `strip`: markup removal
//! - `summary`: boundary-aware shortening
//!
//! [`trim`] composes both and adds the truncation marker.

pub mod strip;
pub mod summary;

pub use strip::strip_tags;
pub use summary::text_summary;

use serde::{Deserialize, Serialize};

use crate::field::TextFormat;

/// Suffix appended to a summary that was cut.
pub const TRUNCATION_MARKER: &str = " [...]";

/// Result of trimming a text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedSummary {
    /// Text without tags, including the marker when content was cut.
    /// Character references stay escaped, so it is safe to use as markup.
    pub text: String,
    /// Whether the visible text was longer than the limit.
    pub truncated: bool,
}

/// Produce the excerpt of `text` limited to `max_length` visible characters.
///
/// `truncated` reflects the length of the whole visible text, not of the
/// result; the marker is only added when the cut text is non-empty.
#[must_use]
pub fn trim(text: &str, max_length: usize, format: Option<&TextFormat>) -> RenderedSummary {
    let stripped = strip_tags(text);
    let visible_len = stripped.chars().count();

    if visible_len <= max_length {
        return RenderedSummary {
            text: stripped,
            truncated: false,
        };
    }

    let mut summary = text_summary(&stripped, format, max_length);
    tracing::debug!(
        "Trimmed {visible_len} visible chars to {} (limit {max_length})",
        summary.chars().count()
    );
    if !summary.is_empty() {
        summary.push_str(TRUNCATION_MARKER);
    }

    RenderedSummary {
        text: summary,
        truncated: true,
    }
}
