//! PostgreSQL array literals.

use crate::buffer::{extract_with, Fallback};
use crate::error::{QuoteError, QuoteResult};
use crate::value::Value;

fn is_plain(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_lowercase() || "_.%&=()<>*/+-".contains(c)
}

fn quote_element(value: &Value<'_>, fallback: Fallback, out: &mut String) -> QuoteResult<()> {
    if value.is_null() {
        out.push_str("NULL");
        return Ok(());
    }
    let view = extract_with(value, fallback)?;
    let s = std::str::from_utf8(&view).map_err(|_| QuoteError::InvalidUtf8)?;
    if s.is_empty() {
        out.push_str("\"\"");
    } else if s.chars().all(is_plain) {
        out.push_str(s);
    } else {
        out.push('"');
        for c in s.chars() {
            if c == '\\' || c == '"' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('"');
    }
    Ok(())
}

/// Formats values as a PostgreSQL array literal, e.g. `{1,NULL,"a b"}`.
pub(crate) fn make_pgarray(items: &[Value<'_>], fallback: Fallback) -> QuoteResult<String> {
    let mut out = String::from("{");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        quote_element(item, fallback, &mut out)?;
    }
    out.push('}');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_literal() {
        let items = [
            Value::from(1),
            Value::Null,
            Value::from(""),
            Value::from("a b"),
            Value::from("q\"\\"),
            Value::from("x_1.5"),
        ];
        assert_eq!(
            make_pgarray(&items, Fallback::Allowed).unwrap(),
            r#"{1,NULL,"","a b","q\"\\",x_1.5}"#
        );
        assert_eq!(make_pgarray(&[], Fallback::Allowed).unwrap(), "{}");
    }

    #[test]
    fn uppercase_is_quoted() {
        let items = [Value::from("ABC")];
        assert_eq!(make_pgarray(&items, Fallback::Allowed).unwrap(), "{\"ABC\"}");
    }
}
