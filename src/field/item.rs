//! Text field values and field types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One item of a rich-text field as supplied by field storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFieldValue {
    /// Raw (unfiltered) markup.
    pub value: String,
    /// Optional author-written summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Text format identifier, e.g. `basic_html`.
    #[serde(default)]
    pub format: String,
    /// Language code of the item.
    #[serde(default)]
    pub langcode: String,
}

impl TextFieldValue {
    /// Create an item with the given value and format.
    #[must_use]
    pub fn new(value: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            format: format.into(),
            ..Self::default()
        }
    }

    /// Attach an author summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the language code.
    #[must_use]
    pub fn with_langcode(mut self, langcode: impl Into<String>) -> Self {
        self.langcode = langcode.into();
        self
    }

    /// The author summary, if one was actually written.
    #[must_use]
    pub fn author_summary(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.is_empty())
    }
}

/// Field types an excerpt can be rendered from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Short formatted text.
    Text,
    /// Long formatted text.
    TextLong,
    /// Long formatted text with an optional summary.
    TextWithSummary,
}

impl FieldType {
    /// All text field types.
    pub const ALL: [Self; 3] = [Self::Text, Self::TextLong, Self::TextWithSummary];

    /// Stable machine name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextLong => "text_long",
            Self::TextWithSummary => "text_with_summary",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_summary_ignores_empty() {
        let item = TextFieldValue::new("<p>Body</p>", "basic_html").with_summary("");
        assert_eq!(item.author_summary(), None);

        let item = item.with_summary("Short");
        assert_eq!(item.author_summary(), Some("Short"));
    }

    #[test]
    fn test_field_type_names_match_serde() {
        for field_type in FieldType::ALL {
            let json = serde_json::to_value(field_type);
            assert!(matches!(
                json,
                Ok(serde_json::Value::String(ref s)) if s == field_type.as_str()
            ));
        }
        let parsed: Result<FieldType, _> = serde_json::from_str(r#""text_long""#);
        assert!(matches!(parsed, Ok(FieldType::TextLong)));
        let parsed: Result<FieldType, _> = serde_json::from_str(r#""integer""#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_deserialize_minimal_item() {
        let item: Result<TextFieldValue, _> = serde_json::from_str(r#"{"value":"Hi"}"#);
        assert!(matches!(item, Ok(ref v) if v.value == "Hi" && v.summary.is_none()));
    }
}
