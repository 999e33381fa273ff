//! Text preparation for terminal display.
//!
//! Message text is shown literally: control characters are neutralized so a
//! reply cannot move the cursor or recolor the terminal.

use unicode_width::UnicodeWidthStr;

/// Replace characters the terminal would interpret.
///
/// Newlines are kept, tabs become spaces, carriage returns are dropped and
/// any other control character (including ESC) becomes U+FFFD.
pub fn sanitize_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => out.push('\n'),
            '\t' => out.push_str("    "),
            '\r' => {}
            c if c.is_control() => out.push('\u{FFFD}'),
            c => out.push(c),
        }
    }
    out
}

/// Wrap a plain text string to the specified width.
/// Returns a vector of wrapped lines; empty text yields one empty line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    textwrap::wrap(text, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

/// Get the visual width of a string in terminal cells.
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Longest suffix of `s` that fits in `max_width` cells.
pub fn tail_to_width(s: &str, max_width: usize) -> &str {
    if visual_width(s) <= max_width {
        return s;
    }

    let mut width = 0;
    let mut start = s.len();
    for (idx, ch) in s.char_indices().rev() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        start = idx;
    }
    &s[start..]
}
