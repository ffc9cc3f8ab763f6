//! Quoting and unquoting for SQL, COPY, bytea, identifiers and friends.
//!
//! Functions taking a [`Value`] read it through [`crate::extract`], so text
//! and bytes are processed in place and any other value is stringified once.
//! The free functions use the default [`QuoteConfig`]; a [`Quoter`] applies
//! a custom one.

mod array;
mod ident;
mod json;
mod sql;
mod urlenc;

pub use ident::{is_reserved_keyword, quote_ident, unquote_fqident, unquote_ident};
pub use json::quote_json;
pub use sql::{unescape, unescape_copy, unquote_literal};
pub use urlenc::db_urldecode;

use crate::buffer::Fallback;
use crate::config::{QuoteConfig, DEFAULT_SCHEMA};
use crate::error::QuoteResult;
use crate::value::Value;

/// Quotes a value as an SQL literal. Null becomes `null`.
///
/// # Errors
///
/// Fails if the value's text conversion fails or the bytes are not UTF-8.
///
/// # Examples
///
/// ```
/// use sqlbuf_core::{quote_literal, Value};
///
/// assert_eq!(quote_literal(&Value::from("it's")).unwrap(), "'it''s'");
/// assert_eq!(quote_literal(&Value::from(r"C:\tmp")).unwrap(), r"E'C:\\tmp'");
/// assert_eq!(quote_literal(&Value::Null).unwrap(), "null");
/// ```
pub fn quote_literal(value: &Value<'_>) -> QuoteResult<String> {
    sql::quote_literal(value, Fallback::Allowed)
}

/// Quotes a value for `COPY ... FROM STDIN`. Null becomes `\N`.
///
/// # Errors
///
/// Same as [`quote_literal`].
pub fn quote_copy(value: &Value<'_>) -> QuoteResult<String> {
    sql::quote_copy(value, Fallback::Allowed)
}

/// Escapes binary data for the bytea parser. Null stays `None`.
///
/// # Errors
///
/// Returns [`crate::QuoteError::ExpectBytes`] for non-binary values.
pub fn quote_bytea_raw(value: &Value<'_>) -> QuoteResult<Option<String>> {
    sql::quote_bytea_raw(value, Fallback::Allowed)
}

/// Quotes binary data as an SQL literal.
///
/// # Errors
///
/// Same as [`quote_bytea_raw`].
pub fn quote_bytea_literal(value: &Value<'_>) -> QuoteResult<String> {
    sql::quote_bytea_literal(value, Fallback::Allowed)
}

/// Quotes binary data for `COPY`.
///
/// # Errors
///
/// Same as [`quote_bytea_raw`].
pub fn quote_bytea_copy(value: &Value<'_>) -> QuoteResult<String> {
    sql::quote_bytea_copy(value, Fallback::Allowed)
}

/// Quotes a fully qualified name; unqualified names get the `public` schema.
pub fn quote_fqident(s: &str) -> String {
    ident::quote_fqident(s, DEFAULT_SCHEMA)
}

/// Encodes pairs as a query string; null values are written as a bare key.
///
/// # Errors
///
/// Fails if a value's text conversion fails.
pub fn db_urlencode<K: AsRef<str>>(pairs: &[(K, Value<'_>)]) -> QuoteResult<String> {
    urlenc::db_urlencode(pairs, Fallback::Allowed)
}

/// Formats values as a PostgreSQL array literal.
///
/// # Errors
///
/// Fails if an element's text conversion fails or its bytes are not UTF-8.
pub fn make_pgarray(items: &[Value<'_>]) -> QuoteResult<String> {
    array::make_pgarray(items, Fallback::Allowed)
}

/// Quoting operations bound to a [`QuoteConfig`].
#[derive(Debug, Clone, Default)]
pub struct Quoter {
    config: QuoteConfig,
}

impl Quoter {
    /// Creates a quoter with the given configuration.
    pub fn new(config: QuoteConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// See [`quote_literal`].
    ///
    /// # Errors
    ///
    /// Also fails for non-text values when the config forbids fallback.
    pub fn quote_literal(&self, value: &Value<'_>) -> QuoteResult<String> {
        sql::quote_literal(value, self.config.fallback)
    }

    /// See [`quote_copy`].
    ///
    /// # Errors
    ///
    /// Also fails for non-text values when the config forbids fallback.
    pub fn quote_copy(&self, value: &Value<'_>) -> QuoteResult<String> {
        sql::quote_copy(value, self.config.fallback)
    }

    /// See [`quote_bytea_raw`].
    ///
    /// # Errors
    ///
    /// Same as [`quote_bytea_raw`].
    pub fn quote_bytea_raw(&self, value: &Value<'_>) -> QuoteResult<Option<String>> {
        sql::quote_bytea_raw(value, self.config.fallback)
    }

    /// See [`quote_bytea_literal`].
    ///
    /// # Errors
    ///
    /// Same as [`quote_bytea_raw`].
    pub fn quote_bytea_literal(&self, value: &Value<'_>) -> QuoteResult<String> {
        sql::quote_bytea_literal(value, self.config.fallback)
    }

    /// See [`quote_bytea_copy`].
    ///
    /// # Errors
    ///
    /// Same as [`quote_bytea_raw`].
    pub fn quote_bytea_copy(&self, value: &Value<'_>) -> QuoteResult<String> {
        sql::quote_bytea_copy(value, self.config.fallback)
    }

    /// Quotes a fully qualified name using the configured default schema.
    pub fn quote_fqident(&self, s: &str) -> String {
        ident::quote_fqident(s, &self.config.default_schema)
    }

    /// Unquotes a literal, honouring `standard_conforming_strings`.
    ///
    /// # Errors
    ///
    /// See [`unquote_literal`].
    pub fn unquote_literal(&self, val: &str) -> QuoteResult<Option<String>> {
        unquote_literal(val, self.config.standard_conforming_strings)
    }

    /// See [`db_urlencode`].
    ///
    /// # Errors
    ///
    /// Also fails for non-text values when the config forbids fallback.
    pub fn db_urlencode<K: AsRef<str>>(&self, pairs: &[(K, Value<'_>)]) -> QuoteResult<String> {
        urlenc::db_urlencode(pairs, self.config.fallback)
    }

    /// See [`make_pgarray`].
    ///
    /// # Errors
    ///
    /// Also fails for non-text values when the config forbids fallback.
    pub fn make_pgarray(&self, items: &[Value<'_>]) -> QuoteResult<String> {
        array::make_pgarray(items, self.config.fallback)
    }
}
