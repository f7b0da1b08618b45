//! Text formats and their lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier of the format used when an item names an unknown one.
pub const FALLBACK_FORMAT: &str = "plain_text";

/// A text format: the filters the host applies before display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFormat {
    /// Machine name.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether newlines are converted into line breaks.
    #[serde(default)]
    pub convert_line_breaks: bool,
    /// Whether markup in the source is shown as literal text.
    #[serde(default)]
    pub escape_html: bool,
}

impl TextFormat {
    /// Create a format with no filters enabled.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            convert_line_breaks: false,
            escape_html: false,
        }
    }

    /// Enable newline conversion.
    #[must_use]
    pub const fn with_line_breaks(mut self) -> Self {
        self.convert_line_breaks = true;
        self
    }

    /// Enable markup escaping.
    #[must_use]
    pub const fn with_escaping(mut self) -> Self {
        self.escape_html = true;
        self
    }
}

/// Resolves format identifiers to formats.
pub trait FormatResolver: Send + Sync {
    /// Look up a format by identifier.
    fn get(&self, id: &str) -> Option<&TextFormat>;

    /// Format used when nothing else matches.
    fn fallback(&self) -> &TextFormat;

    /// Look up a format, falling back when the identifier is unknown.
    fn resolve(&self, id: &str) -> &TextFormat {
        self.get(id).unwrap_or_else(|| {
            let fallback = self.fallback();
            tracing::warn!("Unknown text format {id:?}, using {}", fallback.id);
            fallback
        })
    }
}

/// In-memory set of text formats.
#[derive(Clone, Debug)]
pub struct FormatCatalog {
    formats: HashMap<String, TextFormat>,
    fallback: TextFormat,
}

impl Default for FormatCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FormatCatalog {
    /// Create a catalog holding only the given fallback format.
    #[must_use]
    pub fn new(fallback: TextFormat) -> Self {
        let mut formats = HashMap::new();
        formats.insert(fallback.id.clone(), fallback.clone());
        Self { formats, fallback }
    }

    /// Catalog with the standard formats of a fresh site.
    #[must_use]
    pub fn with_defaults() -> Self {
        let plain = TextFormat::new(FALLBACK_FORMAT, "Plain text")
            .with_escaping()
            .with_line_breaks();
        Self::new(plain)
            .with_format(TextFormat::new("restricted_html", "Restricted HTML").with_line_breaks())
            .with_format(TextFormat::new("basic_html", "Basic HTML"))
            .with_format(TextFormat::new("full_html", "Full HTML"))
    }

    /// Add or replace a format.
    #[must_use]
    pub fn with_format(mut self, format: TextFormat) -> Self {
        self.insert(format);
        self
    }

    /// Add or replace a format in place.
    pub fn insert(&mut self, format: TextFormat) {
        if format.id == self.fallback.id {
            self.fallback = format.clone();
        }
        self.formats.insert(format.id.clone(), format);
    }

    /// Number of known formats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// True if the catalog is empty (never the case: the fallback is always present).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl FormatResolver for FormatCatalog {
    fn get(&self, id: &str) -> Option<&TextFormat> {
        self.formats.get(id)
    }

    fn fallback(&self) -> &TextFormat {
        &self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = FormatCatalog::with_defaults();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.resolve("plain_text").convert_line_breaks);
        assert!(!catalog.resolve("basic_html").escape_html);
    }

    #[test]
    fn test_unknown_format_falls_back() {
        let catalog = FormatCatalog::with_defaults();
        assert_eq!(catalog.resolve("markdown").id, FALLBACK_FORMAT);
        assert_eq!(catalog.resolve("").id, FALLBACK_FORMAT);
    }

    #[test]
    fn test_replacing_fallback() {
        let catalog = FormatCatalog::with_defaults()
            .with_format(TextFormat::new(FALLBACK_FORMAT, "Plain"));
        assert!(!catalog.fallback().convert_line_breaks);
        assert_eq!(catalog.len(), 4);
    }
}
