//! Error types for the sqlbuf core crate.

use std::error::Error as StdError;
use thiserror::Error;

/// Result type for byte view extraction.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Result type for quoting operations.
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Boxed error carried through a failed text conversion.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Coarse classification of errors, used by bindings to pick an exception type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input has a type the operation does not accept.
    TypeError,
    /// The input has the right type but malformed contents.
    ValueError,
    /// A user-supplied text conversion failed.
    Conversion,
}

/// A failed [`crate::ToText`] conversion.
///
/// The display output is the conversion's own message, so propagating it
/// never adds a prefix.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ConversionError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ConversionError {
    /// Create a conversion error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error, keeping it retrievable as the source.
    pub fn from_source(source: impl Into<BoxError>) -> Self {
        let source = source.into();
        Self {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the underlying error if it has type `E`.
    pub fn downcast_source<E: StdError + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref::<E>()
    }

    /// Consumes the error, returning the underlying error if there is one.
    pub fn into_source(self) -> Option<BoxError> {
        self.source
    }
}

/// Errors produced while extracting a byte view from a [`crate::Value`].
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input was the null marker.
    #[error("None is not allowed")]
    NoneNotAllowed,

    /// A conversion was required but no temporary could be produced.
    #[error("Cannot convert to string - recursive fallback failed")]
    RecursiveFallback,

    /// The value's own text conversion failed.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl ExtractError {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoneNotAllowed | Self::RecursiveFallback => ErrorKind::TypeError,
            Self::Conversion(_) => ErrorKind::Conversion,
        }
    }
}

/// Errors that can occur while quoting or unquoting.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Extracting the input bytes failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// A byte-only operation received a non-binary value.
    #[error("Expect bytes")]
    ExpectBytes,

    /// The input bytes are not valid UTF-8 where text is required.
    #[error("invalid UTF-8 in input")]
    InvalidUtf8,

    /// A `$tag$...$tag$` literal with missing or mismatched tags.
    #[error("Bad dollar-quoted string")]
    BadDollarQuote,

    /// A double quote in the middle of an unquoted identifier.
    #[error("unsupported syntax")]
    UnsupportedIdentSyntax,
}

impl QuoteError {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Extract(e) => e.kind(),
            Self::ExpectBytes => ErrorKind::TypeError,
            Self::InvalidUtf8 | Self::BadDollarQuote | Self::UnsupportedIdentSyntax => {
                ErrorKind::ValueError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn extract_messages() {
        assert_eq!(ExtractError::NoneNotAllowed.to_string(), "None is not allowed");
        assert_eq!(
            ExtractError::RecursiveFallback.to_string(),
            "Cannot convert to string - recursive fallback failed"
        );
    }

    #[test]
    fn conversion_is_not_wrapped() {
        let err = ExtractError::from(ConversionError::new("bad __str__"));
        assert_eq!(err.to_string(), "bad __str__");
        assert_eq!(err.kind(), ErrorKind::Conversion);

        let quote_err = QuoteError::from(err);
        assert_eq!(quote_err.to_string(), "bad __str__");
        assert_eq!(quote_err.kind(), ErrorKind::Conversion);
    }

    #[test]
    fn conversion_source_roundtrip() {
        let io_err = io::Error::new(io::ErrorKind::Other, "disk on fire");
        let err = ConversionError::from_source(io_err);
        assert_eq!(err.message(), "disk on fire");
        assert_eq!(
            err.downcast_source::<io::Error>().map(io::Error::kind),
            Some(io::ErrorKind::Other)
        );

        let source = err.into_source().unwrap();
        assert!(source.downcast::<io::Error>().is_ok());
    }

    #[test]
    fn quote_error_kinds() {
        assert_eq!(QuoteError::ExpectBytes.kind(), ErrorKind::TypeError);
        assert_eq!(QuoteError::BadDollarQuote.kind(), ErrorKind::ValueError);
        assert_eq!(
            QuoteError::from(ExtractError::NoneNotAllowed).kind(),
            ErrorKind::TypeError
        );
    }
}
