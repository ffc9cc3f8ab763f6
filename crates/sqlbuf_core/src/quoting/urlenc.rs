//! Database flavoured URL encoding.
//!
//! A key without `=` stands for a null value, so `foo&bar=` decodes to
//! `foo = NULL` and `bar = ''`.

use std::collections::BTreeMap;

use percent_encoding::{percent_decode_str, percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::buffer::{extract_with, Fallback};
use crate::error::QuoteResult;
use crate::value::Value;

/// Characters left alone besides ASCII alphanumerics.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Form-style encoding: spaces become `+`, everything unsafe becomes `%XX`.
fn quote_plus(bytes: &[u8]) -> String {
    bytes
        .split(|&b| b == b' ')
        .map(|part| percent_encode(part, QUERY_COMPONENT).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

fn unquote_plus(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_decode_str(&s).decode_utf8_lossy().into_owned()
}

/// Encodes key/value pairs, writing null values as a bare key.
pub(crate) fn db_urlencode<K: AsRef<str>>(
    pairs: &[(K, Value<'_>)],
    fallback: Fallback,
) -> QuoteResult<String> {
    let mut elems = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        let key = quote_plus(key.as_ref().as_bytes());
        if value.is_null() {
            elems.push(key);
        } else {
            let view = extract_with(value, fallback)?;
            elems.push(format!("{key}={}", quote_plus(&view)));
        }
    }
    Ok(elems.join("&"))
}

/// Decodes a query string. Keys without `=` map to `None`; a repeated key
/// keeps its last value.
pub fn db_urldecode(qs: &str) -> BTreeMap<String, Option<String>> {
    qs.split('&')
        .filter(|elem| !elem.is_empty())
        .map(|elem| match elem.split_once('=') {
            Some((name, value)) => (unquote_plus(name), Some(unquote_plus(value))),
            None => (unquote_plus(elem), None),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(pairs: &[(&str, Value<'_>)]) -> String {
        db_urlencode(pairs, Fallback::Allowed).unwrap()
    }

    #[test]
    fn urlencode() {
        assert_eq!(encode(&[]), "");
        assert_eq!(encode(&[("a", Value::from(1))]), "a=1");
        assert_eq!(encode(&[("a", Value::Null)]), "a");
        assert_eq!(
            encode(&[("qwe", Value::from(1)), ("zz", Value::from("qwe"))]),
            "qwe=1&zz=qwe"
        );
        assert_eq!(encode(&[("a", Value::from("\0%&"))]), "a=%00%25%26");
        assert_eq!(encode(&[("a b", Value::from("c d+"))]), "a+b=c+d%2B");
        assert_eq!(encode(&[("k", Value::from("é"))]), "k=%C3%A9");
    }

    #[test]
    fn urldecode() {
        assert!(db_urldecode("").is_empty());

        let decoded = db_urldecode("a=b&c");
        assert_eq!(decoded.get("a"), Some(&Some("b".to_string())));
        assert_eq!(decoded.get("c"), Some(&None));

        let decoded = db_urldecode("&&b=f&&");
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.get("b"), Some(&Some("f".to_string())));

        assert_eq!(db_urldecode("b=").get("b"), Some(&Some(String::new())));
        assert_eq!(
            db_urldecode("b=%00%45").get("b"),
            Some(&Some("\0E".to_string()))
        );
        assert_eq!(
            db_urldecode("x=a+b%2B").get("x"),
            Some(&Some("a b+".to_string()))
        );
    }

    #[test]
    fn repeated_key_keeps_last() {
        let decoded = db_urldecode("a=1&a=2");
        assert_eq!(decoded.get("a"), Some(&Some("2".to_string())));
    }
}
