//! Formatter registry: identifier to constructor, filled at start-up.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{ExcerptError, ExcerptResult};
use crate::field::FieldType;
use crate::formatter::excerpt::{ExcerptFormatter, SummaryPolicy};
use crate::formatter::plugin::{FieldFormatter, FormatterDefinition};
use crate::formatter::settings::ExcerptSettings;

/// Builds a formatter from stored settings and the field label.
pub type FormatterConstructor = fn(&Value, &str) -> ExcerptResult<Box<dyn FieldFormatter>>;

struct Registration {
    definition: &'static FormatterDefinition,
    constructor: FormatterConstructor,
}

/// Known formatters keyed by identifier.
pub struct FormatterRegistry {
    entries: BTreeMap<&'static str, Registration>,
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FormatterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registry with both excerpt formatters.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            SummaryPolicy::PreferAuthorSummary.definition(),
            build_excerpt,
        );
        registry.register(SummaryPolicy::AlwaysTrim.definition(), build_excerpt_trimmed);
        registry
    }

    /// Register a formatter, replacing any previous one with the same identifier.
    pub fn register(
        &mut self,
        definition: &'static FormatterDefinition,
        constructor: FormatterConstructor,
    ) {
        if self
            .entries
            .insert(
                definition.id,
                Registration {
                    definition,
                    constructor,
                },
            )
            .is_some()
        {
            tracing::warn!("Formatter {} registered twice, keeping the latest", definition.id);
        }
    }

    /// Definitions of all registered formatters, ordered by identifier.
    #[must_use]
    pub fn definitions(&self) -> Vec<&'static FormatterDefinition> {
        self.entries.values().map(|r| r.definition).collect()
    }

    /// Definition of one formatter.
    #[must_use]
    pub fn definition(&self, id: &str) -> Option<&'static FormatterDefinition> {
        self.entries.get(id).map(|r| r.definition)
    }

    /// Identifiers of formatters able to display `field_type`.
    #[must_use]
    pub fn formatters_for(&self, field_type: FieldType) -> Vec<&'static str> {
        self.entries
            .values()
            .filter(|r| r.definition.supports(field_type))
            .map(|r| r.definition.id)
            .collect()
    }

    /// Instantiate a formatter with its stored settings.
    ///
    /// # Errors
    /// Returns `UnknownFormatter` for unregistered identifiers and
    /// `InvalidConfiguration` when the settings do not validate.
    pub fn create(
        &self,
        id: &str,
        settings: &Value,
        field_label: &str,
    ) -> ExcerptResult<Box<dyn FieldFormatter>> {
        let registration = self
            .entries
            .get(id)
            .ok_or_else(|| ExcerptError::UnknownFormatter(id.to_string()))?;
        (registration.constructor)(settings, field_label)
    }

    /// Instantiate a formatter for a field of type `field_type`.
    ///
    /// # Errors
    /// As [`Self::create`], plus `UnsupportedFieldType` when the formatter
    /// cannot display the field.
    pub fn create_for_field(
        &self,
        id: &str,
        field_type: FieldType,
        settings: &Value,
        field_label: &str,
    ) -> ExcerptResult<Box<dyn FieldFormatter>> {
        let definition = self
            .definition(id)
            .ok_or_else(|| ExcerptError::UnknownFormatter(id.to_string()))?;
        if !definition.supports(field_type) {
            return Err(ExcerptError::UnsupportedFieldType {
                formatter: id.to_string(),
                field_type: field_type.to_string(),
            });
        }
        self.create(id, settings, field_label)
    }
}

fn build_excerpt(settings: &Value, field_label: &str) -> ExcerptResult<Box<dyn FieldFormatter>> {
    let settings = ExcerptSettings::from_value(settings)?;
    Ok(Box::new(ExcerptFormatter::new(
        settings,
        SummaryPolicy::PreferAuthorSummary,
        field_label,
    )))
}

fn build_excerpt_trimmed(
    settings: &Value,
    field_label: &str,
) -> ExcerptResult<Box<dyn FieldFormatter>> {
    let settings = ExcerptSettings::from_value(settings)?;
    Ok(Box::new(ExcerptFormatter::new(
        settings,
        SummaryPolicy::AlwaysTrim,
        field_label,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::excerpt::{EXCERPT_FORMATTER_ID, EXCERPT_TRIMMED_FORMATTER_ID};

    static NARROW: FormatterDefinition = FormatterDefinition {
        id: "narrow",
        label: "Narrow",
        field_types: &[FieldType::Text],
        editor: "form",
    };

    #[test]
    fn test_default_registrations() {
        let registry = FormatterRegistry::with_defaults();
        let ids: Vec<&str> = registry.definitions().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![EXCERPT_FORMATTER_ID, EXCERPT_TRIMMED_FORMATTER_ID]);
        assert_eq!(
            registry.formatters_for(FieldType::TextWithSummary).len(),
            2
        );
    }

    #[test]
    fn test_create_with_settings() {
        let registry = FormatterRegistry::with_defaults();
        let formatter = registry.create(
            EXCERPT_FORMATTER_ID,
            &serde_json::json!({"trim_length": "120"}),
            "Body",
        );
        assert!(matches!(
            formatter.map(|f| f.settings_summary()),
            Ok(lines) if lines == vec!["Trimmed (no HTML) limit: 120 characters".to_string()]
        ));
    }

    #[test]
    fn test_create_unknown() {
        let registry = FormatterRegistry::with_defaults();
        let result = registry.create("teaser", &Value::Null, "Body");
        assert!(matches!(result, Err(ExcerptError::UnknownFormatter(id)) if id == "teaser"));
    }

    #[test]
    fn test_create_rejects_invalid_settings() {
        let registry = FormatterRegistry::with_defaults();
        let result = registry.create(
            EXCERPT_TRIMMED_FORMATTER_ID,
            &serde_json::json!({"trim_length": 0}),
            "Body",
        );
        assert!(matches!(result, Err(ExcerptError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_create_for_unsupported_field() {
        let mut registry = FormatterRegistry::with_defaults();
        registry.register(&NARROW, build_excerpt);
        assert!(registry.create_for_field("narrow", FieldType::Text, &Value::Null, "Body").is_ok());
        let result =
            registry.create_for_field("narrow", FieldType::TextLong, &Value::Null, "Body");
        assert!(matches!(result, Err(ExcerptError::UnsupportedFieldType { .. })));
    }
}
