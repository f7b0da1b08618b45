//! Field formatters rendering rich text as excerpts.
//!
//! - `plugin`: the formatter interface and static definitions
//! - `excerpt`: the excerpt formatter
//! - `settings`: settings, settings form and summary
//! - `render`: render nodes and their steps
//! - `registry`: identifier to constructor mapping
//! - `store`: settings persistence per field display

pub mod excerpt;
pub mod plugin;
pub mod registry;
pub mod render;
pub mod settings;
pub mod store;

pub use excerpt::{
    EXCERPT_FORMATTER_ID, EXCERPT_TRIMMED_FORMATTER_ID, ExcerptFormatter, SummaryPolicy,
};
pub use plugin::{FieldFormatter, FormatterDefinition};
pub use registry::{FormatterConstructor, FormatterRegistry};
pub use render::{
    BasicTextFilter, ElementInfo, PROCESSED_TEXT, RenderNode, RenderStep, StandardElements,
    TextFilter, escape_html, pre_render_summary, render,
};
pub use settings::{DEFAULT_TRIM_LENGTH, ExcerptSettings, FormElement};
pub use store::{DisplayKey, InMemorySettingsStore, JsonFileSettingsStore, SettingsStore};
