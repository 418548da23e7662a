//! Word wrapping by display width
//!
//! Widths are measured in terminal columns (unicode-width), never in chars,
//! so wide glyphs such as `–` or CJK text keep the card borders aligned.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
#[inline]
pub fn str_width(s: &str) -> usize {
    s.width()
}

/// Word-wrap `text` into lines no wider than `max_width` columns.
///
/// Runs of whitespace collapse to a single space. Words longer than the
/// width are broken mid-word. Always returns at least one line.
pub fn wrap_words(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };

        if needed <= max_width {
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= max_width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        // Word is too long for a single line, must break mid-word
        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Flow items (badges) left to right, starting a new row when the next item
/// would not fit. Items are separated by `gap` columns.
/// `decorated_extra` is the width each item gains when drawn (brackets).
pub fn flow_items<'a>(
    items: &'a [String],
    decorated_extra: usize,
    gap: usize,
    max_width: usize,
) -> Vec<Vec<&'a str>> {
    let mut rows: Vec<Vec<&str>> = Vec::new();
    let mut row: Vec<&str> = Vec::new();
    let mut row_width = 0;

    for item in items {
        let width = item.width() + decorated_extra;
        let needed = if row.is_empty() { width } else { row_width + gap + width };
        if needed > max_width && !row.is_empty() {
            rows.push(std::mem::take(&mut row));
            row_width = 0;
        }
        row_width = if row.is_empty() { width } else { row_width + gap + width };
        row.push(item.as_str());
    }

    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

/// Truncate to `max_width` columns, ending with `…` when shortened.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push('…');
    out
}
