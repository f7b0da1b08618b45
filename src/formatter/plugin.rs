//! The field formatter interface.

use serde::Serialize;

use crate::field::{FieldType, TextFieldValue};
use crate::formatter::render::{ElementInfo, RenderNode};
use crate::formatter::settings::FormElement;

/// Static description of a formatter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormatterDefinition {
    /// Unique identifier used in display configuration.
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Field types the formatter can display.
    pub field_types: &'static [FieldType],
    /// In-place editor used for fields shown with this formatter.
    pub editor: &'static str,
}

impl FormatterDefinition {
    /// Whether the formatter can display `field_type`.
    #[must_use]
    pub fn supports(&self, field_type: FieldType) -> bool {
        self.field_types.contains(&field_type)
    }
}

/// A configured formatter turning field items into render nodes.
pub trait FieldFormatter: Send + Sync {
    /// Static description.
    fn definition(&self) -> &FormatterDefinition;

    /// Lines describing the current settings.
    fn settings_summary(&self) -> Vec<String>;

    /// Form elements for editing the settings.
    fn settings_form(&self) -> Vec<FormElement>;

    /// Build one render node per item.
    ///
    /// `langcode` is used for items that carry no language of their own.
    fn view_elements(
        &self,
        items: &[TextFieldValue],
        langcode: &str,
        element_info: &dyn ElementInfo,
    ) -> Vec<RenderNode>;
}
