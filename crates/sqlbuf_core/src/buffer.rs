//! Byte view extraction.
//!
//! [`extract`] turns a [`Value`] into a flat, read-only byte view. Text and
//! byte inputs are viewed in place. Anything else is converted once into a
//! temporary that the returned [`ByteView`] owns, so the view can never
//! outlive the memory it points at.

use std::borrow::Cow;
use std::ops::Deref;

use tracing::trace;

use crate::error::{ExtractError, ExtractResult};
use crate::value::Value;

/// Whether extraction may create a temporary.
///
/// The top-level call always allows it. The inner call made on the result
/// of a conversion runs with [`Fallback::Forbidden`], so a conversion is
/// attempted at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    /// A temporary may be created.
    #[default]
    Allowed,
    /// Only values that can be viewed in place are accepted.
    Forbidden,
}

/// Storage created during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Temporary {
    /// Output of a text conversion.
    Text(String),
    /// Concatenated segments of a chunked buffer.
    Bytes(Vec<u8>),
}

impl Temporary {
    /// The bytes held by this temporary.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Temporary::Text(s) => s.as_bytes(),
            Temporary::Bytes(b) => b,
        }
    }

    /// The text, if this temporary came from a text conversion.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Temporary::Text(s) => Some(s),
            Temporary::Bytes(_) => None,
        }
    }

    /// Consumes the temporary, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Temporary::Text(s) => s.into_bytes(),
            Temporary::Bytes(b) => b,
        }
    }
}

/// A read-only view over the bytes of a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteView<'a> {
    /// Aliases memory owned by the input value.
    ZeroCopy(&'a [u8]),
    /// Owns a temporary created during extraction.
    Owned(Temporary),
}

impl ByteView<'_> {
    /// The viewed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ByteView::ZeroCopy(b) => b,
            ByteView::Owned(t) => t.as_bytes(),
        }
    }

    /// Returns true if the view aliases the input value.
    pub fn is_zero_copy(&self) -> bool {
        matches!(self, ByteView::ZeroCopy(_))
    }

    /// The temporary backing this view, if one was created.
    pub fn temporary(&self) -> Option<&Temporary> {
        match self {
            ByteView::ZeroCopy(_) => None,
            ByteView::Owned(t) => Some(t),
        }
    }

    /// Consumes the view, returning the temporary if one was created.
    pub fn into_temporary(self) -> Option<Temporary> {
        match self {
            ByteView::ZeroCopy(_) => None,
            ByteView::Owned(t) => Some(t),
        }
    }

    /// Copies the view into an owned vector.
    pub fn into_vec(self) -> Vec<u8> {
        match self {
            ByteView::ZeroCopy(b) => b.to_vec(),
            ByteView::Owned(t) => t.into_bytes(),
        }
    }
}

impl Deref for ByteView<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for ByteView<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Extracts a byte view, allowing one fallback conversion.
///
/// # Errors
///
/// Returns [`ExtractError::NoneNotAllowed`] for [`Value::Null`], and passes
/// through any error raised by the value's own text conversion.
///
/// # Examples
///
/// ```
/// use sqlbuf_core::{extract, Value};
///
/// let text = Value::from("héllo");
/// let view = extract(&text).unwrap();
/// assert_eq!(&*view, b"h\xc3\xa9llo");
/// assert!(view.is_zero_copy());
///
/// let number = Value::from(42);
/// let view = extract(&number).unwrap();
/// assert_eq!(&*view, b"42");
/// assert!(!view.is_zero_copy());
/// ```
pub fn extract<'a>(value: &'a Value<'_>) -> ExtractResult<ByteView<'a>> {
    extract_with(value, Fallback::Allowed)
}

/// Extracts a byte view under an explicit fallback policy.
///
/// # Errors
///
/// Besides the errors of [`extract`], returns
/// [`ExtractError::RecursiveFallback`] when the value needs a temporary and
/// `fallback` is [`Fallback::Forbidden`].
pub fn extract_with<'a>(value: &'a Value<'_>, fallback: Fallback) -> ExtractResult<ByteView<'a>> {
    match value {
        Value::Null => Err(ExtractError::NoneNotAllowed),
        Value::Text(text) => Ok(ByteView::ZeroCopy(text.as_bytes())),
        Value::Bytes(bytes) => Ok(ByteView::ZeroCopy(bytes)),
        Value::Chunks(chunks) => match chunks.as_slice() {
            [] => Ok(ByteView::ZeroCopy(&[])),
            [single] => Ok(ByteView::ZeroCopy(single)),
            _ => {
                if fallback == Fallback::Forbidden {
                    return Err(ExtractError::RecursiveFallback);
                }
                trace!(segments = chunks.len(), "flattening chunked value");
                let flat = Value::Bytes(Cow::Owned(chunks.concat()));
                into_temporary(flat).map(ByteView::Owned)
            }
        },
        Value::Other(other) => {
            if fallback == Fallback::Forbidden {
                return Err(ExtractError::RecursiveFallback);
            }
            let text = other.to_text()?;
            trace!(len = text.len(), "stringified value for byte view");
            into_temporary(Value::Text(Cow::Owned(text))).map(ByteView::Owned)
        }
    }
}

/// The guarded second step: takes ownership of a converted value and only
/// accepts the variants that need no further conversion.
fn into_temporary(value: Value<'_>) -> ExtractResult<Temporary> {
    match value {
        Value::Null => Err(ExtractError::NoneNotAllowed),
        Value::Text(text) => Ok(Temporary::Text(text.into_owned())),
        Value::Bytes(bytes) => Ok(Temporary::Bytes(bytes.into_owned())),
        Value::Chunks(_) | Value::Other(_) => Err(ExtractError::RecursiveFallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConversionError, ErrorKind};
    use crate::value::ToText;
    use bytes::Bytes;

    #[derive(Debug)]
    struct Failing;

    impl ToText for Failing {
        fn to_text(&self) -> Result<String, ConversionError> {
            Err(ConversionError::new("__str__ returned non-string"))
        }
    }

    #[test]
    fn text_is_zero_copy_utf8() {
        let value = Value::from("héllo");
        let view = extract(&value).unwrap();
        assert_eq!(view.as_bytes(), &[0x68, 0xc3, 0xa9, 0x6c, 0x6c, 0x6f]);
        assert_eq!(view.len(), 6);
        assert!(view.is_zero_copy());
        assert!(view.temporary().is_none());
    }

    #[test]
    fn zero_copy_aliases_input() {
        let source = String::from("alias me");
        let value = Value::from(source.as_str());
        let view = extract(&value).unwrap();
        assert_eq!(view.as_ptr(), source.as_ptr());
    }

    #[test]
    fn bytes_are_zero_copy() {
        let value = Value::from(&b"\x00\x01"[..]);
        let view = extract(&value).unwrap();
        assert_eq!(&*view, &[0x00, 0x01]);
        assert!(view.is_zero_copy());
    }

    #[test]
    fn null_is_rejected_regardless_of_fallback() {
        for fallback in [Fallback::Allowed, Fallback::Forbidden] {
            let err = extract_with(&Value::Null, fallback).unwrap_err();
            assert!(matches!(err, ExtractError::NoneNotAllowed));
            assert_eq!(err.kind(), ErrorKind::TypeError);
            assert_eq!(err.to_string(), "None is not allowed");
        }
    }

    #[test]
    fn other_is_stringified_into_temporary() {
        let value = Value::from(42);
        let view = extract(&value).unwrap();
        assert_eq!(&*view, &[0x34, 0x32]);
        assert_eq!(view.temporary(), Some(&Temporary::Text("42".to_string())));
        assert_eq!(view.temporary().and_then(Temporary::as_text), Some("42"));
    }

    #[test]
    fn other_without_fallback_hits_guard() {
        let err = extract_with(&Value::from(42), Fallback::Forbidden).unwrap_err();
        assert!(matches!(err, ExtractError::RecursiveFallback));
        assert_eq!(
            err.to_string(),
            "Cannot convert to string - recursive fallback failed"
        );
    }

    #[test]
    fn failing_conversion_is_propagated() {
        let err = extract(&Value::other(Failing)).unwrap_err();
        match err {
            ExtractError::Conversion(inner) => {
                assert_eq!(inner.message(), "__str__ returned non-string");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn chunks() {
        let single = Value::from(Bytes::from_static(b"abc"));
        let view = extract_with(&single, Fallback::Forbidden).unwrap();
        assert!(view.is_zero_copy());
        assert_eq!(&*view, b"abc");

        let empty = Value::Chunks(Vec::new());
        assert!(extract(&empty).unwrap().is_empty());

        let split = Value::from(vec![Bytes::from_static(b"ab"), Bytes::from_static(b"cd")]);
        let view = extract(&split).unwrap();
        assert_eq!(view.temporary(), Some(&Temporary::Bytes(b"abcd".to_vec())));

        let err = extract_with(&split, Fallback::Forbidden).unwrap_err();
        assert!(matches!(err, ExtractError::RecursiveFallback));
    }

    #[test]
    fn repeated_extraction_is_stable() {
        let value = Value::from(vec![9u8, 8, 7]);
        let first = extract(&value).unwrap();
        let second = extract(&value).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn into_vec_copies() {
        assert_eq!(extract(&Value::from("xy")).unwrap().into_vec(), b"xy");
        assert_eq!(extract(&Value::from(1.5)).unwrap().into_vec(), b"1.5");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn text_views_equal_utf8(s in any::<String>()) {
                let value = Value::from(s.as_str());
                let view = extract(&value).unwrap();
                prop_assert!(view.is_zero_copy());
                prop_assert_eq!(view.as_bytes(), s.as_bytes());
            }

            #[test]
            fn byte_views_equal_input(b in prop::collection::vec(any::<u8>(), 0..256)) {
                let value = Value::from(b.as_slice());
                let view = extract(&value).unwrap();
                prop_assert!(view.is_zero_copy());
                prop_assert_eq!(view.as_bytes(), b.as_slice());
            }

            #[test]
            fn integers_stringify(n in any::<i64>()) {
                let value = Value::from(n);
                let expected = n.to_string();
                let view = extract(&value).unwrap();
                let text = view.temporary().and_then(Temporary::as_text);
                prop_assert_eq!(text, Some(expected.as_str()));
                prop_assert!(extract_with(&value, Fallback::Forbidden).is_err());
            }
        }
    }
}
