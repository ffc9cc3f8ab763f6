//! Extraction and quoting test vectors.
//!
//! [`all_vectors_json`] serializes both tables.

use serde::{Deserialize, Serialize};
use sqlbuf_core::{
    extract, quote_copy, quote_fqident, quote_ident, quote_json, quote_literal, unescape,
    unquote_fqident, unquote_literal, Value,
};

/// An extraction test vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Input kind: `null`, `text`, `bytes` or `int`.
    pub kind: String,
    /// Input data: text as is, bytes hex-encoded, integers in decimal.
    pub input: String,
    /// Expected view (hex-encoded).
    pub expected_hex: String,
    /// Whether the view must alias the input.
    pub zero_copy: bool,
    /// Expected error message (if this should fail).
    pub expected_error: Option<String>,
}

/// A quoting test vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Name of the function under test.
    pub function: String,
    /// Text input; `None` is null.
    pub input: Option<String>,
    /// Expected output; `None` is null.
    pub expected: Option<String>,
}

fn extract_vector(
    id: &str,
    description: &str,
    kind: &str,
    input: &str,
    expected_hex: &str,
    zero_copy: bool,
) -> TestVector {
    TestVector {
        id: id.into(),
        description: description.into(),
        kind: kind.into(),
        input: input.into(),
        expected_hex: expected_hex.into(),
        zero_copy,
        expected_error: None,
    }
}

/// Extraction vectors.
pub fn extract_vectors() -> Vec<TestVector> {
    vec![
        extract_vector(
            "text_utf8",
            "Text is viewed as its UTF-8 encoding",
            "text",
            "héllo",
            "68c3a96c6c6f",
            true,
        ),
        extract_vector("text_empty", "Empty text", "text", "", "", true),
        extract_vector("bytes_raw", "Bytes are viewed as is", "bytes", "0001", "0001", true),
        extract_vector("bytes_empty", "Empty bytes", "bytes", "", "", true),
        extract_vector("int_42", "Integers are stringified", "int", "42", "3432", false),
        extract_vector("int_negative", "Negative integer", "int", "-7", "2d37", false),
        TestVector {
            id: "null".into(),
            description: "Null is rejected".into(),
            kind: "null".into(),
            input: String::new(),
            expected_hex: String::new(),
            zero_copy: false,
            expected_error: Some("None is not allowed".into()),
        },
    ]
}

fn quote_vector(
    id: &str,
    function: &str,
    input: Option<&str>,
    expected: Option<&str>,
) -> QuoteVector {
    QuoteVector {
        id: id.into(),
        function: function.into(),
        input: input.map(Into::into),
        expected: expected.map(Into::into),
    }
}

/// Quoting vectors.
pub fn quote_vectors() -> Vec<QuoteVector> {
    vec![
        quote_vector("literal_null", "quote_literal", None, Some("null")),
        quote_vector("literal_quote", "quote_literal", Some("a'b"), Some("'a''b'")),
        quote_vector("literal_backslash", "quote_literal", Some(r"a\'b"), Some(r"E'a\\''b'")),
        quote_vector("copy_null", "quote_copy", None, Some("\\N")),
        quote_vector("copy_tab", "quote_copy", Some("a'\tb"), Some("a'\\tb")),
        quote_vector("ident_plain", "quote_ident", Some("abc_19"), Some("abc_19")),
        quote_vector("ident_keyword", "quote_ident", Some("from"), Some("\"from\"")),
        quote_vector("ident_quote", "quote_ident", Some("a\"b"), Some("\"a\"\"b\"")),
        quote_vector("fqident_default", "quote_fqident", Some("tbl"), Some("public.tbl")),
        quote_vector("fqident_dotted", "quote_fqident", Some("s.t.u"), Some("s.\"t.u\"")),
        quote_vector(
            "unquote_fqident",
            "unquote_fqident",
            Some("Public.\"Tbl\""),
            Some("public.Tbl"),
        ),
        quote_vector("unquote_null", "unquote_literal", Some("NULL"), None),
        quote_vector("unquote_number", "unquote_literal", Some("123"), Some("123")),
        quote_vector("unquote_extended", "unquote_literal", Some(r"E'a\tb'"), Some("a\tb")),
        quote_vector("unquote_dollar", "unquote_literal", Some("$$qw$e$z$$"), Some("qw$e$z")),
        quote_vector("unescape_octal", "unescape", Some(r"\101x"), Some("Ax")),
        quote_vector("json_null", "quote_json", None, Some("null")),
        quote_vector("json_escape", "quote_json", Some("</script>"), Some(r#""<\/script>""#)),
    ]
}

/// Checks an extraction vector against the extractor.
///
/// # Errors
///
/// Returns a description of the mismatch.
pub fn check_extract_vector(vector: &TestVector) -> Result<(), String> {
    let bytes;
    let value = match vector.kind.as_str() {
        "null" => Value::Null,
        "text" => Value::from(vector.input.as_str()),
        "bytes" => {
            bytes = hex::decode(&vector.input).map_err(|e| format!("{}: {e}", vector.id))?;
            Value::from(bytes.as_slice())
        }
        "int" => {
            let n: i64 = vector.input.parse().map_err(|e| format!("{}: {e}", vector.id))?;
            Value::from(n)
        }
        other => return Err(format!("{}: unknown kind {other}", vector.id)),
    };

    match (extract(&value), &vector.expected_error) {
        (Ok(view), None) => {
            if hex::encode(&*view) != vector.expected_hex {
                return Err(format!("{}: got {}", vector.id, hex::encode(&*view)));
            }
            if view.is_zero_copy() != vector.zero_copy {
                return Err(format!("{}: zero_copy is {}", vector.id, view.is_zero_copy()));
            }
            Ok(())
        }
        (Err(e), Some(expected)) if e.to_string() == *expected => Ok(()),
        (Err(e), _) => Err(format!("{}: unexpected error {e}", vector.id)),
        (Ok(_), Some(expected)) => Err(format!("{}: expected error {expected}", vector.id)),
    }
}

/// Checks a quoting vector against the core functions.
///
/// # Errors
///
/// Returns a description of the mismatch.
pub fn check_quote_vector(vector: &QuoteVector) -> Result<(), String> {
    let input = vector.input.as_deref();
    let value = input.map_or(Value::Null, Value::from);
    let text = || input.ok_or_else(|| format!("{}: input required", vector.id));

    let got = match vector.function.as_str() {
        "quote_literal" => quote_literal(&value).map(Some),
        "quote_copy" => quote_copy(&value).map(Some),
        "quote_ident" => Ok(Some(quote_ident(text()?))),
        "quote_fqident" => Ok(Some(quote_fqident(text()?))),
        "unquote_fqident" => unquote_fqident(text()?).map(Some),
        "unquote_literal" => unquote_literal(text()?, false),
        "unescape" => Ok(Some(unescape(text()?))),
        "quote_json" => Ok(Some(quote_json(input))),
        other => return Err(format!("{}: unknown function {other}", vector.id)),
    }
    .map_err(|e| format!("{}: {e}", vector.id))?;

    if got == vector.expected {
        Ok(())
    } else {
        Err(format!("{}: got {got:?}, expected {:?}", vector.id, vector.expected))
    }
}

/// Generate all test vectors as JSON for cross-language use.
pub fn all_vectors_json() -> String {
    let vectors = AllTestVectors {
        extract: extract_vectors(),
        quote: quote_vectors(),
    };

    serde_json::to_string_pretty(&vectors).expect("Failed to serialize vectors")
}

#[derive(Debug, Serialize, Deserialize)]
struct AllTestVectors {
    extract: Vec<TestVector>,
    quote: Vec<QuoteVector>,
}
