//! Fuzz testing harnesses for SQLBuf.
//!
//! These targets can be driven by cargo-fuzz or any other fuzzer. Each one
//! must return normally for every input; a panic is a bug.

use bytes::Bytes;
use sqlbuf_core::{
    db_urldecode, extract, make_pgarray, quote_bytea_raw, quote_copy, quote_literal, unescape,
    unescape_copy, unquote_fqident, unquote_literal, Value,
};

/// Fuzz target for extraction.
///
/// Views `data` as bytes, as lossy text and as two chunks, and checks that
/// every view reproduces its input.
pub fn fuzz_extract(data: &[u8]) {
    let value = Value::from(data);
    let view = extract(&value).map(|v| v.into_vec());
    assert_eq!(view.as_deref().ok(), Some(data), "bytes view mismatch");

    let text = String::from_utf8_lossy(data);
    let value = Value::from(text.as_ref());
    let view = extract(&value).map(|v| v.into_vec());
    assert_eq!(view.as_deref().ok(), Some(text.as_bytes()), "text view mismatch");

    let split = data.len() / 2;
    let value = Value::from(vec![
        Bytes::copy_from_slice(&data[..split]),
        Bytes::copy_from_slice(&data[split..]),
    ]);
    let view = extract(&value).map(|v| v.into_vec());
    assert_eq!(view.as_deref().ok(), Some(data), "chunked view mismatch");
}

/// Fuzz target for the quoting functions.
///
/// Errors are fine; only panics are failures.
pub fn fuzz_quote(data: &[u8]) {
    let value = Value::from(data);
    let _ = quote_literal(&value);
    let _ = quote_copy(&value);
    let _ = quote_bytea_raw(&value);
    let _ = make_pgarray(&[value, Value::Null]);
}

/// Fuzz target for the unquoting functions.
pub fn fuzz_unquote(data: &[u8]) {
    let text = String::from_utf8_lossy(data);
    let _ = unquote_literal(&text, false);
    let _ = unquote_literal(&text, true);
    let _ = unquote_fqident(&text);
    let _ = unescape(&text);
    let _ = unescape_copy(&text);
    let _ = db_urldecode(&text);
}

/// Fuzz target for quote/unquote consistency.
///
/// Any UTF-8 input without NUL must survive a literal round trip.
pub fn fuzz_literal_roundtrip(data: &[u8]) {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.contains('\0') {
        return;
    }
    let Ok(quoted) = quote_literal(&Value::from(text)) else {
        return;
    };
    let unquoted = unquote_literal(&quoted, false);
    assert_eq!(
        unquoted.ok().flatten().as_deref(),
        Some(text),
        "roundtrip mismatch for {quoted}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &[&[u8]] = &[
        b"",
        b"'",
        b"\\",
        b"$$",
        b"$a$",
        b"E'\\",
        b"\"",
        b"a.b.c",
        b"%zz&=&",
        b"\xff\xfe\x00",
        b"\\777\\x",
        "héllo 'wörld'".as_bytes(),
    ];

    #[test]
    fn test_fuzz_extract() {
        for data in CORPUS {
            fuzz_extract(data);
        }
    }

    #[test]
    fn test_fuzz_quote() {
        for data in CORPUS {
            fuzz_quote(data);
        }
    }

    #[test]
    fn test_fuzz_unquote() {
        for data in CORPUS {
            fuzz_unquote(data);
        }
    }

    #[test]
    fn test_fuzz_literal_roundtrip() {
        for data in CORPUS {
            fuzz_literal_roundtrip(data);
        }
    }
}
