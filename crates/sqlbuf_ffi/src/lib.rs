//! # SQLBuf FFI
//!
//! Stable C ABI for sqlbuf.
//!
//! This crate provides:
//! - `sqlbuf_get_buffer`, the zero-copy byte view entry point
//! - Quoting functions returning owned strings
//! - Memory ownership conventions (`sqlbuf_free_*`)
//! - Error codes and a thread-local last error message

#![warn(missing_docs)]

mod buffer;
mod error;
mod extract;
mod quoting;
mod value;

pub use buffer::{sqlbuf_free_buffer, sqlbuf_free_string, SqlBufBuffer, SqlBufString};
pub use error::{
    clear_last_error, set_last_error, sqlbuf_clear_error, sqlbuf_get_last_error, SqlBufResult,
};
pub use extract::sqlbuf_get_buffer;
pub use quoting::{sqlbuf_quote_copy, sqlbuf_quote_literal};
pub use value::{
    SqlBufValue, SqlBufValueKind, SQLBUF_BYTES, SQLBUF_FLOAT, SQLBUF_INT, SQLBUF_NULL,
    SQLBUF_TEXT,
};
