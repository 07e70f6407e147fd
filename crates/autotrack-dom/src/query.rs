//! Id selector parsing
//!
//! Decodes the identifier half of an `#id` selector following the CSS
//! Syntax escaping rules, so escaped ids round-trip to the literal
//! attribute value they were produced from.

const REPLACEMENT: char = '\u{FFFD}';

/// Is `c` an identifier code point (usable unescaped anywhere in an ident)?
#[inline]
fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

/// Check that `escaped` is a syntactically valid CSS identifier.
///
/// Unescaped characters must be identifier code points, a leading digit
/// (or `-` followed by a digit) must be escaped, and a backslash may not
/// be followed by a newline.
pub fn is_valid_ident(escaped: &str) -> bool {
    if escaped.is_empty() {
        return false;
    }

    let mut chars = escaped.chars().peekable();
    let mut position = 0;
    let mut leading_dash = false;
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('\n') | Some('\r') | Some('\x0C') => return false,
                // A trailing backslash decodes to U+FFFD
                None => return true,
                Some(h) if h.is_ascii_hexdigit() => {
                    let mut digits = 1;
                    while digits < 6 && chars.peek().is_some_and(|d| d.is_ascii_hexdigit()) {
                        chars.next();
                        digits += 1;
                    }
                    if matches!(chars.peek(), Some(' ' | '\t' | '\n' | '\r' | '\x0C')) {
                        chars.next();
                    }
                }
                Some(_) => {}
            }
        } else {
            if !is_ident_char(c) {
                return false;
            }
            if c.is_ascii_digit() && (position == 0 || (position == 1 && leading_dash)) {
                return false;
            }
            if position == 0 && c == '-' {
                leading_dash = true;
                // A lone "-" is not an identifier
                if chars.peek().is_none() {
                    return false;
                }
            }
        }
        position += 1;
    }
    true
}

/// Decode CSS escapes in an identifier.
///
/// `\` followed by 1-6 hex digits is a code point (one whitespace after it is
/// swallowed). Zero, surrogates and out-of-range values decode to U+FFFD, as
/// does a backslash at end of input. Any other escaped char stands for itself.
pub fn unescape_ident(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(&next) = chars.peek() else {
            out.push(REPLACEMENT);
            break;
        };

        if next.is_ascii_hexdigit() {
            let mut value: u32 = 0;
            let mut digits = 0;
            while digits < 6 {
                match chars.peek().and_then(|d| d.to_digit(16)) {
                    Some(d) => {
                        value = value * 16 + d;
                        digits += 1;
                        chars.next();
                    }
                    None => break,
                }
            }
            if matches!(chars.peek(), Some(' ' | '\t' | '\n' | '\r' | '\x0C')) {
                chars.next();
            }
            let decoded = if value == 0 { None } else { char::from_u32(value) };
            out.push(decoded.unwrap_or(REPLACEMENT));
        } else {
            out.push(next);
            chars.next();
        }
    }

    out
}
