//! Boundary-aware text shortening.
//!
//! [`text_summary`] cuts plain text to at most `size` characters, trying
//! progressively less desirable break points:
//! 1. a line break, when the format turns newlines into breaks
//! 2. the end of a sentence
//! 3. the end of a word
//! 4. exactly `size` characters, backing off a partial character reference

use crate::field::TextFormat;

/// Punctuation that ends a sentence when followed by whitespace.
const SENTENCE_ENDS: [char; 4] = ['.', '!', '?', '\u{061F}'];

/// Full-width punctuation that ends a sentence on its own.
const FULL_WIDTH_SENTENCE_ENDS: [char; 3] = ['\u{3002}', '\u{FF01}', '\u{FF1F}'];

/// Shorten `text` to at most `size` characters at the best available boundary.
///
/// Text that already fits is returned unchanged. Otherwise the result is a
/// prefix of `text` without trailing whitespace.
#[must_use]
pub fn text_summary(text: &str, format: Option<&TextFormat>, size: usize) -> String {
    let Some((window_end, _)) = text.char_indices().nth(size) else {
        return text.to_string();
    };

    let window = &text[..window_end];
    let next = text[window_end..].chars().next();
    let line_breaks = format.is_some_and(|f| f.convert_line_breaks);

    let cut = line_breaks
        .then(|| line_break_cut(window, next))
        .flatten()
        .filter(|&cut| has_content(window, cut))
        .or_else(|| sentence_cut(window, next).filter(|&cut| has_content(window, cut)))
        .or_else(|| word_cut(window, next).filter(|&cut| has_content(window, cut)))
        .unwrap_or_else(|| hard_cut(window));

    window[..cut].trim_end().to_string()
}

fn has_content(window: &str, cut: usize) -> bool {
    !window[..cut].trim_end().is_empty()
}

/// Byte offset of the last newline in the window.
fn line_break_cut(window: &str, next: Option<char>) -> Option<usize> {
    if next == Some('\n') {
        return Some(window.len());
    }
    window.rfind('\n')
}

/// Byte offset just past the last sentence end in the window.
fn sentence_cut(window: &str, next: Option<char>) -> Option<usize> {
    let mut chars = window.char_indices().peekable();
    let mut last = None;

    while let Some((idx, ch)) = chars.next() {
        let end = idx + ch.len_utf8();
        if FULL_WIDTH_SENTENCE_ENDS.contains(&ch) {
            last = Some(end);
        } else if SENTENCE_ENDS.contains(&ch) {
            let following = chars.peek().map(|&(_, c)| c).or(next);
            if following.is_none_or(char::is_whitespace) {
                last = Some(end);
            }
        }
    }

    last
}

/// Byte offset of the window end, moved before a character reference the
/// window would split.
fn hard_cut(window: &str) -> usize {
    match window.rfind('&') {
        Some(amp)
            if window[amp + 1..]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '#') =>
        {
            amp
        }
        _ => window.len(),
    }
}

/// Byte offset of the last word end in the window.
fn word_cut(window: &str, next: Option<char>) -> Option<usize> {
    if next.is_some_and(char::is_whitespace) {
        return Some(window.len());
    }
    window
        .char_indices()
        .filter(|(_, c)| c.is_whitespace())
        .map(|(idx, _)| idx)
        .next_back()
}
