//! # SQLBuf Core
//!
//! Byte view extraction and SQL quoting helpers.
//!
//! The centre of this crate is [`extract`], which turns a dynamically typed
//! [`Value`] into a read-only byte view:
//! - Text and byte values are viewed in place, without copying
//! - Any other value is converted to text once, and the view owns the result
//! - Null is always rejected
//!
//! The [`quoting`] module builds SQL, COPY, bytea, identifier and URL
//! quoting on top of it, and [`hashtext_new`] hashes a view the way
//! PostgreSQL's `hashtext()` does.
//!
//! ## Usage
//!
//! ```
//! use sqlbuf_core::{extract, quote_literal, Value};
//!
//! let value = Value::from("héllo");
//! let view = extract(&value).unwrap();
//! assert_eq!(view.len(), 6);
//! assert!(view.is_zero_copy());
//!
//! assert_eq!(quote_literal(&Value::from(42)).unwrap(), "'42'");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod error;
mod hashtext;
pub mod quoting;
mod value;

pub use buffer::{extract, extract_with, ByteView, Fallback, Temporary};
pub use config::{QuoteConfig, DEFAULT_SCHEMA};
pub use error::{
    BoxError, ConversionError, ErrorKind, ExtractError, ExtractResult, QuoteError, QuoteResult,
};
pub use hashtext::{hash_bytes_new, hash_bytes_old, hashtext_new, hashtext_old};
pub use quoting::{
    db_urldecode, db_urlencode, make_pgarray, quote_bytea_copy, quote_bytea_literal,
    quote_bytea_raw, quote_copy, quote_fqident, quote_ident, quote_json, quote_literal,
    unescape, unescape_copy, unquote_fqident, unquote_ident, unquote_literal, Quoter,
};
pub use value::{Displayed, ToText, Value};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
