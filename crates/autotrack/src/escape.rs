//! Id escaping
//!
//! Serializes an arbitrary id as a CSS identifier (the `CSS.escape()`
//! algorithm) so it can be handed to a structural `#id` lookup.

use std::fmt::Write;

fn push_code_point_escape(out: &mut String, c: char) {
    // Writing to a String cannot fail
    let _ = write!(out, "\\{:x} ", c as u32);
}

/// Escape `id` for use as a CSS identifier.
///
/// Control characters, a leading digit and a digit following a leading `-`
/// become hex escapes; a lone `-` and any other non-identifier ASCII char
/// get a backslash prefix. NUL becomes U+FFFD.
pub fn css_escape(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 4);
    let first = id.chars().next();
    let single = id.chars().nth(1).is_none();

    for (index, c) in id.chars().enumerate() {
        match c {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1F}' | '\u{7F}' => push_code_point_escape(&mut out, c),
            '0'..='9' if index == 0 || (index == 1 && first == Some('-')) => {
                push_code_point_escape(&mut out, c)
            }
            '-' if index == 0 && single => out.push_str("\\-"),
            c if !c.is_ascii() || c.is_ascii_alphanumeric() || c == '-' || c == '_' => out.push(c),
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ids_unchanged() {
        assert_eq!(css_escape("main-nav"), "main-nav");
        assert_eq!(css_escape("_x9"), "_x9");
        assert_eq!(css_escape("caf\u{e9}"), "caf\u{e9}");
        assert_eq!(css_escape(""), "");
    }

    #[test]
    fn test_leading_digits() {
        assert_eq!(css_escape("3"), "\\33 ");
        assert_eq!(css_escape("10"), "\\31 0");
        assert_eq!(css_escape("-1a"), "-\\31 a");
        assert_eq!(css_escape("a1"), "a1");
    }

    #[test]
    fn test_punctuation_and_controls() {
        assert_eq!(css_escape("a(b)"), "a\\(b\\)");
        assert_eq!(css_escape("it's"), "it\\'s");
        assert_eq!(css_escape("a b.c#d"), "a\\ b\\.c\\#d");
        assert_eq!(css_escape("-"), "\\-");
        assert_eq!(css_escape("\u{7}x"), "\\7 x");
        assert_eq!(css_escape("a\0"), "a\u{FFFD}");
    }
}
