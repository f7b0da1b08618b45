//! The excerpt formatter.

use crate::field::{FieldType, TextFieldValue};
use crate::formatter::plugin::{FieldFormatter, FormatterDefinition};
use crate::formatter::render::{ElementInfo, RenderNode};
use crate::formatter::settings::{ExcerptSettings, FormElement};

/// Identifier of the excerpt formatter that prefers author summaries.
pub const EXCERPT_FORMATTER_ID: &str = "excerpt";

/// Identifier of the excerpt formatter that always trims the body.
pub const EXCERPT_TRIMMED_FORMATTER_ID: &str = "excerpt_trimmed";

const EXCERPT_DEFINITION: FormatterDefinition = FormatterDefinition {
    id: EXCERPT_FORMATTER_ID,
    label: "Excerpt",
    field_types: &FieldType::ALL,
    editor: "form",
};

const EXCERPT_TRIMMED_DEFINITION: FormatterDefinition = FormatterDefinition {
    id: EXCERPT_TRIMMED_FORMATTER_ID,
    label: "Excerpt (always trimmed)",
    field_types: &FieldType::ALL,
    editor: "form",
};

/// Whether an author summary replaces the trimmed body.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SummaryPolicy {
    /// Show the author summary verbatim when one exists.
    #[default]
    PreferAuthorSummary,
    /// Always trim the body.
    AlwaysTrim,
}

impl SummaryPolicy {
    /// Definition of the formatter using this policy.
    #[must_use]
    pub const fn definition(self) -> &'static FormatterDefinition {
        match self {
            Self::PreferAuthorSummary => &EXCERPT_DEFINITION,
            Self::AlwaysTrim => &EXCERPT_TRIMMED_DEFINITION,
        }
    }
}

/// Renders rich text as a short plain-text excerpt.
#[derive(Clone, Debug)]
pub struct ExcerptFormatter {
    settings: ExcerptSettings,
    policy: SummaryPolicy,
    field_label: String,
}

impl ExcerptFormatter {
    /// Create a formatter for the field labelled `field_label`.
    #[must_use]
    pub fn new(
        settings: ExcerptSettings,
        policy: SummaryPolicy,
        field_label: impl Into<String>,
    ) -> Self {
        Self {
            settings,
            policy,
            field_label: field_label.into(),
        }
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> &ExcerptSettings {
        &self.settings
    }

    /// Summary policy.
    #[must_use]
    pub const fn policy(&self) -> SummaryPolicy {
        self.policy
    }

    fn view_item(
        &self,
        item: &TextFieldValue,
        langcode: &str,
        info: &dyn ElementInfo,
    ) -> RenderNode {
        let langcode = if item.langcode.is_empty() {
            langcode
        } else {
            item.langcode.as_str()
        };

        let author_summary = match self.policy {
            SummaryPolicy::PreferAuthorSummary => item.author_summary(),
            SummaryPolicy::AlwaysTrim => None,
        };

        match author_summary {
            Some(summary) => {
                RenderNode::processed_text(summary, &item.format, langcode).with_defaults(info)
            }
            None => RenderNode::processed_text(&item.value, &item.format, langcode)
                .with_defaults(info)
                .with_summary(self.settings.trim_length()),
        }
    }
}

impl FieldFormatter for ExcerptFormatter {
    fn definition(&self) -> &FormatterDefinition {
        self.policy.definition()
    }

    fn settings_summary(&self) -> Vec<String> {
        self.settings.summary()
    }

    fn settings_form(&self) -> Vec<FormElement> {
        self.settings.form(&self.field_label)
    }

    fn view_elements(
        &self,
        items: &[TextFieldValue],
        langcode: &str,
        element_info: &dyn ElementInfo,
    ) -> Vec<RenderNode> {
        items
            .iter()
            .map(|item| self.view_item(item, langcode, element_info))
            .collect()
    }
}
