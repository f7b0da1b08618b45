//! Excerpt formatter settings, settings form and summary.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ExcerptError, ExcerptResult};

/// Default trim length in characters.
pub const DEFAULT_TRIM_LENGTH: u32 = 350;

/// Per-display settings of the excerpt formatter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcerptSettings {
    /// Maximum visible characters of the excerpt.
    #[serde(
        default = "default_trim_length",
        deserialize_with = "deserialize_trim_length"
    )]
    pub trim_length: u32,
}

impl Default for ExcerptSettings {
    fn default() -> Self {
        Self {
            trim_length: DEFAULT_TRIM_LENGTH,
        }
    }
}

impl ExcerptSettings {
    /// Create validated settings.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `trim_length` is zero.
    pub fn new(trim_length: u32) -> ExcerptResult<Self> {
        let settings = Self { trim_length };
        settings.validate()?;
        Ok(settings)
    }

    /// Parse and validate settings from stored JSON; `null` yields defaults.
    ///
    /// # Errors
    /// Returns an error if the JSON has the wrong shape or fails validation.
    pub fn from_value(value: &Value) -> ExcerptResult<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        let settings: Self = serde_json::from_value(value.clone()).map_err(|e| {
            ExcerptError::InvalidConfiguration(format!("trim_length: {e}"))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate setting invariants.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `trim_length` is zero.
    pub fn validate(&self) -> ExcerptResult<()> {
        if self.trim_length == 0 {
            return Err(ExcerptError::InvalidConfiguration(
                "trim_length must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Trim length as a character count.
    #[must_use]
    pub fn trim_length(&self) -> usize {
        usize::try_from(self.trim_length).unwrap_or(usize::MAX)
    }

    /// One-line summaries shown in the display overview.
    #[must_use]
    pub fn summary(&self) -> Vec<String> {
        vec![format!(
            "Trimmed (no HTML) limit: {} characters",
            self.trim_length
        )]
    }

    /// Form elements for editing these settings on the field labelled `field_label`.
    #[must_use]
    pub fn form(&self, field_label: &str) -> Vec<FormElement> {
        vec![FormElement {
            key: "trim_length".to_string(),
            element_type: "number".to_string(),
            title: "Trimmed limit".to_string(),
            field_suffix: Some("characters".to_string()),
            default_value: Value::from(self.trim_length),
            description: format!(
                "If the summary is not set, the trimmed {field_label} field will end at the last full sentence before this character limit."
            ),
            min: Some(1),
            required: true,
        }]
    }
}

/// A single element of a settings form, as handed to the host's form layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormElement {
    /// Settings key the element edits.
    pub key: String,
    /// Widget type.
    #[serde(rename = "type")]
    pub element_type: String,
    /// Label.
    pub title: String,
    /// Text after the input.
    pub field_suffix: Option<String>,
    /// Current value.
    pub default_value: Value,
    /// Help text.
    pub description: String,
    /// Minimum accepted number.
    pub min: Option<i64>,
    /// Whether a value must be provided.
    pub required: bool,
}

const fn default_trim_length() -> u32 {
    DEFAULT_TRIM_LENGTH
}

/// Accept both `350` and `"350"`; the host stores settings as strings.
fn deserialize_trim_length<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
