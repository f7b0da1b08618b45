//! Render nodes handed to the host render pipeline.
//!
//! A node carries an ordered list of [`RenderStep`]s instead of callbacks.
//! Element defaults come from an [`ElementInfo`] supplied by the caller, and
//! [`render`] applies the steps in order.

use serde::{Deserialize, Serialize};

use crate::field::{FormatResolver, TextFormat};
use crate::trimming::trim;

/// Element type for filtered rich text.
pub const PROCESSED_TEXT: &str = "processed_text";

/// One transformation applied while rendering a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStep {
    /// Run the text through its format's filters into markup.
    FilterText,
    /// Replace the markup with its tag-free excerpt.
    TrimSummary,
}

/// A renderable element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderNode {
    /// Element type, e.g. [`PROCESSED_TEXT`].
    pub element_type: String,
    /// Source text before filtering.
    pub text: Option<String>,
    /// Text format identifier.
    pub format: String,
    /// Language code.
    pub langcode: String,
    /// Output markup, set by the render steps.
    pub markup: Option<String>,
    /// Limit used by [`RenderStep::TrimSummary`].
    pub summary_trim_length: Option<usize>,
    /// Steps applied by [`render`], in order.
    pub steps: Vec<RenderStep>,
}

impl RenderNode {
    /// A `processed_text` node with no steps yet.
    #[must_use]
    pub fn processed_text(
        text: impl Into<String>,
        format: impl Into<String>,
        langcode: impl Into<String>,
    ) -> Self {
        Self {
            element_type: PROCESSED_TEXT.to_string(),
            text: Some(text.into()),
            format: format.into(),
            langcode: langcode.into(),
            ..Self::default()
        }
    }

    /// Prepend the element type's default steps that the node does not already have.
    #[must_use]
    pub fn with_defaults(mut self, info: &dyn ElementInfo) -> Self {
        let mut steps: Vec<RenderStep> = info
            .default_steps(&self.element_type)
            .into_iter()
            .filter(|step| !self.steps.contains(step))
            .collect();
        steps.append(&mut self.steps);
        self.steps = steps;
        self
    }

    /// Request trimming to `trim_length` characters as the final step.
    #[must_use]
    pub fn with_summary(mut self, trim_length: usize) -> Self {
        self.summary_trim_length = Some(trim_length);
        self.steps.retain(|step| *step != RenderStep::TrimSummary);
        self.steps.push(RenderStep::TrimSummary);
        self
    }
}

/// Default properties of element types.
pub trait ElementInfo: Send + Sync {
    /// Steps every element of this type runs before any added by a formatter.
    fn default_steps(&self, element_type: &str) -> Vec<RenderStep>;
}

/// Element defaults of a stock site: `processed_text` is filtered, nothing else is.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardElements;

impl ElementInfo for StandardElements {
    fn default_steps(&self, element_type: &str) -> Vec<RenderStep> {
        if element_type == PROCESSED_TEXT {
            vec![RenderStep::FilterText]
        } else {
            Vec::new()
        }
    }
}

/// Turns source text into markup according to a text format.
pub trait TextFilter: Send + Sync {
    /// Filter `text` with `format`.
    fn filter(&self, text: &str, format: &TextFormat) -> String;
}

/// Filter honouring the escape and line-break flags of a format.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicTextFilter;

impl TextFilter for BasicTextFilter {
    fn filter(&self, text: &str, format: &TextFormat) -> String {
        let markup = if format.escape_html {
            escape_html(text)
        } else {
            text.to_string()
        };
        if format.convert_line_breaks {
            markup.replace("\r\n", "\n").replace('\n', "<br>\n")
        } else {
            markup
        }
    }
}

/// Escape text for inclusion in markup.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Replace the node's markup with its excerpt.
///
/// Without a trim length the node is returned unchanged. When no markup has
/// been produced yet the raw text is trimmed instead.
#[must_use]
pub fn pre_render_summary(mut node: RenderNode, formats: &dyn FormatResolver) -> RenderNode {
    let Some(size) = node.summary_trim_length else {
        return node;
    };
    let source = node.markup.as_deref().or(node.text.as_deref()).unwrap_or("");
    let format = formats.resolve(&node.format);
    let summary = trim(source, size, Some(format));
    node.markup = Some(summary.text);
    node
}

/// Apply every step of the node in order.
#[must_use]
pub fn render(
    node: RenderNode,
    filter: &dyn TextFilter,
    formats: &dyn FormatResolver,
) -> RenderNode {
    let steps = node.steps.clone();
    steps.into_iter().fold(node, |mut node, step| match step {
        RenderStep::FilterText => {
            let format = formats.resolve(&node.format);
            let text = node.text.as_deref().unwrap_or("");
            node.markup = Some(filter.filter(text, format));
            node
        }
        RenderStep::TrimSummary => pre_render_summary(node, formats),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FormatCatalog;

    #[test]
    fn test_defaults_come_first() {
        let node = RenderNode::processed_text("<p>x</p>", "basic_html", "en")
            .with_summary(10)
            .with_defaults(&StandardElements);
        assert_eq!(
            node.steps,
            vec![RenderStep::FilterText, RenderStep::TrimSummary]
        );
    }

    #[test]
    fn test_defaults_not_duplicated() {
        let node = RenderNode::processed_text("x", "basic_html", "en")
            .with_defaults(&StandardElements)
            .with_defaults(&StandardElements);
        assert_eq!(node.steps, vec![RenderStep::FilterText]);
    }

    #[test]
    fn test_unknown_element_has_no_defaults() {
        let node = RenderNode {
            element_type: "markup".to_string(),
            ..RenderNode::default()
        }
        .with_defaults(&StandardElements);
        assert!(node.steps.is_empty());
    }

    #[test]
    fn test_basic_filter() {
        let plain = TextFormat::new("plain_text", "Plain")
            .with_escaping()
            .with_line_breaks();
        assert_eq!(
            BasicTextFilter.filter("a < b\nc", &plain),
            "a &lt; b<br>\nc"
        );
        let html = TextFormat::new("full_html", "Full");
        assert_eq!(BasicTextFilter.filter("<b>x</b>", &html), "<b>x</b>");
    }

    #[test]
    fn test_pre_render_summary_trims_markup() {
        let formats = FormatCatalog::with_defaults();
        let mut node = RenderNode::processed_text("ignored", "basic_html", "en").with_summary(15);
        node.markup = Some("<p>Hello world. Another sentence here.</p>".to_string());
        let node = pre_render_summary(node, &formats);
        assert_eq!(node.markup.as_deref(), Some("Hello world. [...]"));
    }

    #[test]
    fn test_pre_render_summary_without_length_is_noop() {
        let formats = FormatCatalog::with_defaults();
        let node = RenderNode::processed_text("<p>Body</p>", "basic_html", "en");
        let rendered = pre_render_summary(node.clone(), &formats);
        assert_eq!(rendered, node);
    }

    #[test]
    fn test_summary_keeps_escaped_text_once() {
        let formats = FormatCatalog::with_defaults();
        let node = RenderNode::processed_text("<p>Fish &amp; chips &lt;3</p>", "full_html", "en")
            .with_summary(100)
            .with_defaults(&StandardElements);
        let node = render(node, &BasicTextFilter, &formats);
        assert_eq!(node.markup.as_deref(), Some("Fish &amp; chips &lt;3"));
    }

    #[test]
    fn test_plain_text_summary_escaped_by_filter_only() {
        let formats = FormatCatalog::with_defaults();
        let node = RenderNode::processed_text("a < b & c", "plain_text", "en")
            .with_summary(100)
            .with_defaults(&StandardElements);
        let node = render(node, &BasicTextFilter, &formats);
        assert_eq!(node.markup.as_deref(), Some("a &lt; b &amp; c"));
    }

    #[test]
    fn test_render_plain_text_keeps_line_boundary() {
        let formats = FormatCatalog::with_defaults();
        let node = RenderNode::processed_text("First part\nsecond part goes on", "plain_text", "en")
            .with_summary(15)
            .with_defaults(&StandardElements);
        let node = render(node, &BasicTextFilter, &formats);
        assert_eq!(node.markup.as_deref(), Some("First part [...]"));
    }

    #[test]
    fn test_render_without_summary_filters_only() {
        let formats = FormatCatalog::with_defaults();
        let node = RenderNode::processed_text("<em>Hi</em>", "basic_html", "en")
            .with_defaults(&StandardElements);
        let node = render(node, &BasicTextFilter, &formats);
        assert_eq!(node.markup.as_deref(), Some("<em>Hi</em>"));
    }
}
