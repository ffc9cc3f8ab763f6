//! SQL literal, COPY and bytea quoting, plus C-style unescaping.

use std::fmt::Write as _;

use crate::buffer::{extract_with, Fallback};
use crate::error::{QuoteError, QuoteResult};
use crate::value::Value;

fn into_string(out: Vec<u8>) -> QuoteResult<String> {
    String::from_utf8(out).map_err(|_| QuoteError::InvalidUtf8)
}

/// Quotes a value as an SQL literal.
///
/// Null becomes `null` without quotes. If the value contains a backslash
/// the extended `E'...'` form is used, otherwise a standard literal.
pub(crate) fn quote_literal(value: &Value<'_>, fallback: Fallback) -> QuoteResult<String> {
    if value.is_null() {
        return Ok("null".to_string());
    }
    let view = extract_with(value, fallback)?;
    let src = view.as_bytes();

    let mut out = Vec::with_capacity(src.len() + 4);
    if src.contains(&b'\\') {
        out.push(b'E');
    }
    out.push(b'\'');
    for &b in src {
        match b {
            b'\'' => out.extend_from_slice(b"''"),
            b'\\' => out.extend_from_slice(b"\\\\"),
            _ => out.push(b),
        }
    }
    out.push(b'\'');
    into_string(out)
}

/// Quotes a value for the text format of `COPY`. Null becomes `\N`.
pub(crate) fn quote_copy(value: &Value<'_>, fallback: Fallback) -> QuoteResult<String> {
    if value.is_null() {
        return Ok("\\N".to_string());
    }
    let view = extract_with(value, fallback)?;
    let src = view.as_bytes();

    let mut out = Vec::with_capacity(src.len() + 2);
    for &b in src {
        match b {
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\t' => out.extend_from_slice(b"\\t"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            _ => out.push(b),
        }
    }
    into_string(out)
}

/// Escapes raw bytes for the bytea input parser. Null stays null.
pub(crate) fn quote_bytea_raw(
    value: &Value<'_>,
    fallback: Fallback,
) -> QuoteResult<Option<String>> {
    if value.is_null() {
        return Ok(None);
    }
    if !value.is_binary() {
        return Err(QuoteError::ExpectBytes);
    }
    let view = extract_with(value, fallback)?;

    let mut out = String::with_capacity(view.len() * 2);
    for &b in view.iter() {
        if !(0x20..0x7f).contains(&b) {
            // writing into a String cannot fail
            let _ = write!(out, "\\{b:03o}");
        } else if b == b'\\' {
            out.push_str("\\\\");
        } else {
            out.push(char::from(b));
        }
    }
    Ok(Some(out))
}

/// Bytea escaping followed by literal quoting.
pub(crate) fn quote_bytea_literal(value: &Value<'_>, fallback: Fallback) -> QuoteResult<String> {
    let raw = quote_bytea_raw(value, fallback)?;
    quote_literal(&Value::from(raw), fallback)
}

/// Bytea escaping followed by COPY quoting.
pub(crate) fn quote_bytea_copy(value: &Value<'_>, fallback: Fallback) -> QuoteResult<String> {
    let raw = quote_bytea_raw(value, fallback)?;
    quote_copy(&Value::from(raw), fallback)
}

fn simple_escape(c: char) -> char {
    match c {
        't' => '\t',
        'n' => '\n',
        'r' => '\r',
        'a' => '\x07',
        'b' => '\x08',
        other => other,
    }
}

/// Decodes backslash escapes, and `''` too when `sql_quotes` is set.
fn unescape_into(val: &str, sql_quotes: bool, out: &mut String) {
    let mut chars = val.chars().peekable();
    while let Some(c) = chars.next() {
        if sql_quotes && c == '\'' && chars.peek() == Some(&'\'') {
            chars.next();
            out.push('\'');
            continue;
        }
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => out.push('\\'),
            // a backslash does not escape a line break
            Some('\n') => out.push_str("\\\n"),
            Some(d @ '0'..='7') => {
                let mut code = d.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|n| n.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            Some(e) => out.push(simple_escape(e)),
        }
    }
}

/// Removes C-style backslash escapes from a string.
///
/// Recognises `\t \n \r \a \b`, octal escapes of one to three digits, and
/// passes any other escaped character through as itself.
pub fn unescape(val: &str) -> String {
    let mut out = String::with_capacity(val.len());
    unescape_into(val, false, &mut out);
    out
}

/// Like [`unescape`], but `\N` (the COPY null marker) becomes `None`.
pub fn unescape_copy(val: &str) -> Option<String> {
    if val == "\\N" {
        return None;
    }
    Some(unescape(val))
}

fn unquote_dollar(val: &str) -> QuoteResult<String> {
    let inner = &val[1..val.len() - 1];
    let open = inner.find('$').map(|p| p + 1);
    let close = inner.rfind('$').map(|p| p + 1);
    if let (Some(p1), Some(p2)) = (open, close) {
        if p2 > p1 {
            let start_tag = &val[..=p1];
            let end_tag = &val[p2..];
            if start_tag == end_tag {
                return Ok(val[start_tag.len()..val.len() - end_tag.len()].to_string());
            }
        }
    }
    Err(QuoteError::BadDollarQuote)
}

/// Unquotes an SQL literal.
///
/// - `E'...'` uses extended (backslash) escaping.
/// - `'...'` uses standard escaping when `std_strings` is set, extended otherwise.
/// - `$tag$...$tag$` returns the body verbatim.
/// - `null` in any case becomes `None`.
/// - Anything else is returned unchanged.
///
/// # Errors
///
/// Returns [`QuoteError::BadDollarQuote`] for a dollar-quoted literal whose
/// tags are missing or do not match.
pub fn unquote_literal(val: &str, std_strings: bool) -> QuoteResult<Option<String>> {
    if val.starts_with('\'') && val.ends_with('\'') {
        // a lone quote counts as an empty literal
        let inner = val.get(1..val.len() - 1).unwrap_or("");
        if std_strings {
            return Ok(Some(inner.replace("''", "'")));
        }
        let mut out = String::with_capacity(inner.len());
        unescape_into(inner, true, &mut out);
        return Ok(Some(out));
    }

    let extended = val
        .strip_prefix(['E', 'e'])
        .and_then(|v| v.strip_prefix('\''))
        .and_then(|v| v.strip_suffix('\''));
    if let Some(inner) = extended {
        let mut out = String::with_capacity(inner.len());
        unescape_into(inner, true, &mut out);
        return Ok(Some(out));
    }

    if val.len() >= 2 && val.starts_with('$') && val.ends_with('$') {
        return unquote_dollar(val).map(Some);
    }

    if val.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    Ok(Some(val.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    fn literal(value: Value<'_>) -> String {
        quote_literal(&value, Fallback::Allowed).unwrap()
    }

    fn copy(value: Value<'_>) -> String {
        quote_copy(&value, Fallback::Allowed).unwrap()
    }

    fn bytea(value: Value<'_>) -> Option<String> {
        quote_bytea_raw(&value, Fallback::Allowed).unwrap()
    }

    #[test]
    fn literal_quoting() {
        assert_eq!(literal(Value::Null), "null");
        assert_eq!(literal(Value::from("")), "''");
        assert_eq!(literal(Value::from("a'b")), "'a''b'");
        assert_eq!(literal(Value::from(r"a\'b")), r"E'a\\''b'");
        assert_eq!(literal(Value::from(1)), "'1'");
        assert_eq!(literal(Value::from(&b"raw"[..])), "'raw'");
    }

    #[test]
    fn literal_respects_fallback() {
        let err = quote_literal(&Value::from(1), Fallback::Forbidden).unwrap_err();
        assert!(matches!(
            err,
            QuoteError::Extract(ExtractError::RecursiveFallback)
        ));
    }

    #[test]
    fn literal_rejects_invalid_utf8() {
        let err = quote_literal(&Value::from(vec![0xffu8]), Fallback::Allowed).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidUtf8));
    }

    #[test]
    fn copy_quoting() {
        assert_eq!(copy(Value::Null), "\\N");
        assert_eq!(copy(Value::from("")), "");
        assert_eq!(copy(Value::from("a'\tb")), "a'\\tb");
        assert_eq!(copy(Value::from(r"a\'b")), r"a\\'b");
        assert_eq!(copy(Value::from("x\r\ny")), "x\\r\\ny");
        assert_eq!(copy(Value::from(1)), "1");
    }

    #[test]
    fn bytea_raw_quoting() {
        assert_eq!(bytea(Value::Null), None);
        assert_eq!(bytea(Value::from(&b""[..])).as_deref(), Some(""));
        assert_eq!(bytea(Value::from(&b"a'\tb"[..])).as_deref(), Some("a'\\011b"));
        assert_eq!(bytea(Value::from(&b"a\\'b"[..])).as_deref(), Some(r"a\\'b"));
        assert_eq!(bytea(Value::from(&b"\t\xe4"[..])).as_deref(), Some(r"\011\344"));
        assert_eq!(bytea(Value::from(&b"\x7f"[..])).as_deref(), Some(r"\177"));
    }

    #[test]
    fn bytea_rejects_text() {
        let err = quote_bytea_raw(&Value::from("abc"), Fallback::Allowed).unwrap_err();
        assert!(matches!(err, QuoteError::ExpectBytes));
        assert_eq!(err.to_string(), "Expect bytes");
    }

    #[test]
    fn bytea_composed() {
        let value = Value::from(&b"\x00'"[..]);
        assert_eq!(
            quote_bytea_literal(&value, Fallback::Allowed).unwrap(),
            r"E'\\000'''"
        );
        assert_eq!(
            quote_bytea_copy(&value, Fallback::Allowed).unwrap(),
            r"\\000'"
        );
        assert_eq!(
            quote_bytea_literal(&Value::Null, Fallback::Allowed).unwrap(),
            "null"
        );
        assert_eq!(
            quote_bytea_copy(&Value::Null, Fallback::Allowed).unwrap(),
            "\\N"
        );
    }

    #[test]
    fn unescape_sequences() {
        assert_eq!(unescape(""), "");
        assert_eq!(unescape("\\N"), "N");
        assert_eq!(unescape("abc"), "abc");
        assert_eq!(unescape(r"\0\000\001\01\1"), "\0\0\x01\x01\x01");
        assert_eq!(unescape(r"a\001b\tc\r\n"), "a\x01b\tc\r\n");
        assert_eq!(unescape(r#"\a\b\'\"\\"#), "\x07\x08'\"\\");
        assert_eq!(unescape(r"\101x"), "Ax");
        assert_eq!(unescape("tail\\"), "tail\\");
    }

    #[test]
    fn unescape_copy_null() {
        assert_eq!(unescape_copy("\\N"), None);
        assert_eq!(unescape_copy(r"a\tb").as_deref(), Some("a\tb"));
    }

    #[test]
    fn unquote_common() {
        let cases: &[(&str, Option<&str>)] = &[
            ("null", None),
            ("NULL", None),
            ("123", Some("123")),
            ("''", Some("")),
            ("'a''b''c'", Some("a'b'c")),
            ("'foo'", Some("foo")),
            ("E'foo'", Some("foo")),
            (r"E'a\n\t\a\b\0\z\'b'", Some("a\n\t\x07\x08\0z'b")),
            ("$$$$", Some("")),
            ("$$qw$e$z$$", Some("qw$e$z")),
            (r#"$qq$$aa$$$'"\\$qq$"#, Some(r#"$aa$$$'"\\"#)),
        ];
        for std_strings in [false, true] {
            for (input, expected) in cases {
                let got = unquote_literal(input, std_strings).unwrap();
                assert_eq!(got.as_deref(), *expected, "input {input:?}");
            }
        }
    }

    #[test]
    fn unquote_lone_quote_is_empty() {
        for std_strings in [false, true] {
            assert_eq!(unquote_literal("'", std_strings).unwrap().as_deref(), Some(""));
        }
        assert_eq!(unquote_literal("E'", false).unwrap().as_deref(), Some("E'"));
    }

    #[test]
    fn unquote_extended_only() {
        assert_eq!(
            unquote_literal(r"'a\\b\\c'", false).unwrap().as_deref(),
            Some(r"a\b\c")
        );
        assert_eq!(
            unquote_literal(r"e'a\\b\\c'", false).unwrap().as_deref(),
            Some(r"a\b\c")
        );
    }

    #[test]
    fn unquote_standard_only() {
        assert_eq!(
            unquote_literal(r"'\\''z'", true).unwrap().as_deref(),
            Some(r"\\'z")
        );
    }

    #[test]
    fn unquote_bad_dollar() {
        for bad in ["$$", "$a$b$", "$a$x$b$"] {
            let err = unquote_literal(bad, false).unwrap_err();
            assert!(matches!(err, QuoteError::BadDollarQuote), "input {bad:?}");
        }
    }
}
