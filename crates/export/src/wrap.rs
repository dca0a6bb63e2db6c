//! Greedy word wrapping with approximate Times glyph widths.

use crate::layout::FontStyle;

/// Approximate advance width of `ch` in em units.
fn char_width(ch: char) -> f32 {
    match ch {
        ' ' | '.' | ',' | ';' | ':' | '\'' | '!' | '|' | 'i' | 'j' | 'l' | 't' | 'f' | 'r'
        | 'I' => 0.3,
        'm' | 'w' | 'M' | 'W' | '%' | '@' => 0.9,
        'A'..='Z' => 0.7,
        _ => 0.5,
    }
}

/// Approximate rendered width of `text` in points.
pub(crate) fn text_width(text: &str, font_size: f32, style: FontStyle) -> f32 {
    let em: f32 = text.chars().map(char_width).sum();
    let factor = match style {
        FontStyle::Regular => 1.0,
        FontStyle::Bold => 1.05,
    };
    em * font_size * factor
}

/// Break `text` into lines no wider than `max_width`. Whitespace runs collapse
/// to single spaces; a word wider than a whole line is split by characters.
/// Always returns at least one line.
pub(crate) fn wrap(text: &str, max_width: f32, font_size: f32, style: FontStyle) -> Vec<String> {
    let fits = |s: &str| text_width(s, font_size, style) <= max_width;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if fits(word) {
            current = word.to_string();
        } else {
            for ch in word.chars() {
                current.push(ch);
                if !fits(&current) && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::replace(&mut current, ch.to_string()));
                }
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
