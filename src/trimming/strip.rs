//! Markup removal.

use scraper::Html;

/// Elements whose text content is never visible.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "template", "noscript"];

/// Remove all tags from `html`, keeping only visible text.
///
/// Text nodes are concatenated as they appear; no separator is inserted between
/// block elements. The result is still markup-safe: `&`, `<` and `>` in text
/// come back as character references, so stripping it again is a no-op.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    if !html.contains(['<', '&']) {
        return html.to_string();
    }

    let fragment = Html::parse_fragment(html);
    let mut text = String::with_capacity(html.len());

    for node in fragment.root_element().descendants() {
        let Some(chunk) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            push_escaped(&mut text, chunk);
        }
    }

    text
}

fn push_escaped(out: &mut String, chunk: &str) {
    for ch in chunk.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}
