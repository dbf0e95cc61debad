//! Decoding and encoding of Go string literals.
//!
//! `unquote` turns the source text of an interpreted (`"..."`) or raw
//! (`` `...` ``) literal into its value; `quote` produces an interpreted
//! literal suitable for a source rewrite.

use std::fmt::Write;

/// Decodes a string literal as written in source.
///
/// Returns `None` for anything that is not a well-formed string literal,
/// including literals whose byte escapes do not form valid UTF-8.
#[must_use]
pub fn unquote(raw: &str) -> Option<String> {
    if raw.len() < 2 {
        return None;
    }
    if let Some(body) = raw.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        if body.contains('`') {
            return None;
        }
        return Some(body.replace('\r', ""));
    }
    let body = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"'))?;
    unquote_interpreted(body)
}

fn unquote_interpreted(body: &str) -> Option<String> {
    if !body.contains('\\') {
        if body.contains('"') || body.contains('\n') {
            return None;
        }
        return Some(body.to_owned());
    }

    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\n' => return None,
            '\\' => {
                let escape = chars.next()?;
                match escape {
                    'a' => out.push(0x07),
                    'b' => out.push(0x08),
                    'f' => out.push(0x0C),
                    'n' => out.push(b'\n'),
                    'r' => out.push(b'\r'),
                    't' => out.push(b'\t'),
                    'v' => out.push(0x0B),
                    '\\' => out.push(b'\\'),
                    '"' => out.push(b'"'),
                    'x' => {
                        let value = take_digits(&mut chars, 2, 16)?;
                        out.push(u8::try_from(value).ok()?);
                    }
                    '0'..='7' => {
                        let rest = take_digits(&mut chars, 2, 8)?;
                        let value = escape.to_digit(8)? * 64 + rest;
                        out.push(u8::try_from(value).ok()?);
                    }
                    'u' | 'U' => {
                        let width = if escape == 'u' { 4 } else { 8 };
                        let value = take_digits(&mut chars, width, 16)?;
                        let decoded = char::from_u32(value)?;
                        let mut buf = [0u8; 4];
                        out.extend_from_slice(decoded.encode_utf8(&mut buf).as_bytes());
                    }
                    _ => return None,
                }
            }
            other => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    String::from_utf8(out).ok()
}

fn take_digits(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    count: usize,
    radix: u32,
) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        let digit = chars.next()?.to_digit(radix)?;
        value = value * radix + digit;
    }
    Some(value)
}

/// Encodes `text` as an interpreted string literal.
#[must_use]
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0B}' => out.push_str("\\v"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c if is_unprintable(c) => {
                let code = u32::from(c);
                if code > 0xFFFF {
                    let _ = write!(out, "\\U{code:08x}");
                } else {
                    let _ = write!(out, "\\u{code:04x}");
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Control and invisible format characters that must not appear verbatim.
fn is_unprintable(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{00AD}'
                | '\u{200B}'..='\u{200F}'
                | '\u{2028}'..='\u{202E}'
                | '\u{2060}'..='\u{2064}'
                | '\u{FEFF}'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquote_plain_literal() {
        assert_eq!(unquote("\"hello\"").as_deref(), Some("hello"));
        assert_eq!(unquote("\"\"").as_deref(), Some(""));
    }

    #[test]
    fn unquote_escapes() {
        assert_eq!(unquote(r#""\nHello""#).as_deref(), Some("\nHello"));
        assert_eq!(unquote(r#""tab\there""#).as_deref(), Some("tab\there"));
        assert_eq!(unquote(r#""say \"hi\"""#).as_deref(), Some("say \"hi\""));
        assert_eq!(unquote(r#""\u00e9t\u00e9""#).as_deref(), Some("été"));
        assert_eq!(unquote(r#""\U0001F600""#).as_deref(), Some("😀"));
        assert_eq!(unquote(r#""\x41\102""#).as_deref(), Some("AB"));
    }

    #[test]
    fn unquote_utf8_byte_escapes() {
        assert_eq!(unquote(r#""\xc3\xa9""#).as_deref(), Some("é"));
    }

    #[test]
    fn unquote_raw_literal() {
        assert_eq!(
            unquote("`user token leaked\nin raw`").as_deref(),
            Some("user token leaked\nin raw")
        );
        assert_eq!(unquote("`a\r\nb`").as_deref(), Some("a\nb"));
    }

    #[test]
    fn unquote_rejects_malformed() {
        assert_eq!(unquote(r#""bad \q escape""#), None);
        assert_eq!(unquote(r#""\'""#), None);
        assert_eq!(unquote(r#""\x4""#), None);
        assert_eq!(unquote(r#""\xff""#), None);
        assert_eq!(unquote(r#""\uD800""#), None);
        assert_eq!(unquote("'a'"), None);
        assert_eq!(unquote("\""), None);
        assert_eq!(unquote("\"unterminated"), None);
        assert_eq!(unquote("\"abé"), None);
        assert_eq!(unquote("é\"x\""), None);
        assert_eq!(unquote("`é"), None);
    }

    #[test]
    fn quote_escapes_specials() {
        assert_eq!(quote("hello"), "\"hello\"");
        assert_eq!(quote("\nhello"), "\"\\nhello\"");
        assert_eq!(quote("a \"b\" \\"), "\"a \\\"b\\\" \\\\\"");
        assert_eq!(quote("bell\u{07}"), "\"bell\\a\"");
        assert_eq!(quote("\u{01}"), "\"\\x01\"");
        assert_eq!(quote("dev \u{200d} deployed"), "\"dev \\u200d deployed\"");
    }

    #[test]
    fn quote_keeps_printable_unicode() {
        assert_eq!(quote("déjà vu"), "\"déjà vu\"");
        assert_eq!(quote("漢字"), "\"漢字\"");
    }

    #[test]
    fn quoted_text_decodes_back() {
        for text in ["plain", "\nnew line", "tab\tand \"quotes\"", "é ☃ \u{200d}"] {
            assert_eq!(unquote(&quote(text)).as_deref(), Some(text));
        }
    }
}
