//! Dynamic input values accepted by the buffer extractor.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

use crate::error::ConversionError;

/// Capability for values that can render themselves as text.
///
/// This is what the extractor falls back to for [`Value::Other`]. A
/// conversion may fail; the error is handed to the caller unchanged.
pub trait ToText: fmt::Debug {
    /// Produces the textual representation of this value.
    fn to_text(&self) -> Result<String, ConversionError>;
}

/// Adapter implementing [`ToText`] through [`fmt::Display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displayed<T>(pub T);

impl<T: fmt::Display + fmt::Debug> ToText for Displayed<T> {
    fn to_text(&self) -> Result<String, ConversionError> {
        Ok(self.0.to_string())
    }
}

/// A dynamically-typed value.
///
/// `Text` and `Bytes` may borrow from the caller, in which case the byte
/// view produced by [`crate::extract`] aliases the caller's memory.
#[derive(Debug)]
pub enum Value<'a> {
    /// The null marker. Never convertible to bytes.
    Null,
    /// UTF-8 text.
    Text(Cow<'a, str>),
    /// Raw byte sequence.
    Bytes(Cow<'a, [u8]>),
    /// Segmented byte buffer. Only a single segment can be viewed in place.
    Chunks(Vec<Bytes>),
    /// Any other value; converted through [`ToText`].
    Other(Box<dyn ToText + Send + Sync + 'a>),
}

impl<'a> Value<'a> {
    /// Creates a text value.
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        Value::Text(text.into())
    }

    /// Creates a byte sequence value.
    pub fn bytes(bytes: impl Into<Cow<'a, [u8]>>) -> Self {
        Value::Bytes(bytes.into())
    }

    /// Wraps an arbitrary value implementing [`ToText`].
    pub fn other(value: impl ToText + Send + Sync + 'a) -> Self {
        Value::Other(Box::new(value))
    }

    /// Wraps any `Display` value; it is stringified on extraction.
    pub fn display<T>(value: T) -> Self
    where
        T: fmt::Display + fmt::Debug + Send + Sync + 'a,
    {
        Value::other(Displayed(value))
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for values that are already byte-like.
    pub fn is_binary(&self) -> bool {
        matches!(self, Value::Bytes(_) | Value::Chunks(_))
    }

    /// Get this value as a string, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as bytes, if it is a contiguous byte sequence.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Chunks(_) => "chunks",
            Value::Other(_) => "other",
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Text(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::Text(Cow::Owned(s))
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(b: &'a [u8]) -> Self {
        Value::Bytes(Cow::Borrowed(b))
    }
}

impl From<Vec<u8>> for Value<'_> {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Cow::Owned(b))
    }
}

impl From<Bytes> for Value<'_> {
    fn from(b: Bytes) -> Self {
        Value::Chunks(vec![b])
    }
}

impl From<Vec<Bytes>> for Value<'_> {
    fn from(chunks: Vec<Bytes>) -> Self {
        Value::Chunks(chunks)
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value<'_> {
                fn from(v: $ty) -> Self {
                    Value::display(v)
                }
            }
        )*
    };
}

impl_from_display!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize, f32, f64, bool, char);

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<()> for Value<'_> {
    fn from((): ()) -> Self {
        Value::Null
    }
}
