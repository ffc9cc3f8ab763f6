//! Quoting entry points.

use sqlbuf_core::{quote_copy, quote_literal, QuoteResult, Value};

use crate::buffer::SqlBufString;
use crate::error::{clear_last_error, report_quote, set_last_error, SqlBufResult};
use crate::value::SqlBufValue;

unsafe fn run_quote(
    value: *const SqlBufValue,
    out: *mut SqlBufString,
    quote: fn(&Value<'_>) -> QuoteResult<String>,
) -> SqlBufResult {
    clear_last_error();

    if value.is_null() || out.is_null() {
        set_last_error("null pointer argument");
        return SqlBufResult::NullPointer;
    }
    *out = SqlBufString::default();

    let value = match (*value).as_value() {
        Ok(v) => v,
        Err(code) => return code,
    };

    let quoted = match quote(&value) {
        Ok(s) => s,
        Err(e) => return report_quote(&e),
    };

    match SqlBufString::from_string(quoted) {
        Some(s) => {
            *out = s;
            SqlBufResult::Ok
        }
        None => {
            set_last_error("quoted value contains a NUL byte");
            SqlBufResult::InvalidArgument
        }
    }
}

/// Quotes a value as an SQL literal.
///
/// Null becomes the unquoted string `null`. Release `*out` with
/// `sqlbuf_free_string`. On failure `*out` is left null.
///
/// # Safety
///
/// - `value` must be a valid pointer whose `data` covers `len` bytes
/// - `out` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn sqlbuf_quote_literal(
    value: *const SqlBufValue,
    out: *mut SqlBufString,
) -> SqlBufResult {
    run_quote(value, out, quote_literal)
}

/// Quotes a value for COPY text format.
///
/// Null becomes `\N`. Release `*out` with `sqlbuf_free_string`. On
/// failure `*out` is left null.
///
/// # Safety
///
/// - `value` must be a valid pointer whose `data` covers `len` bytes
/// - `out` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn sqlbuf_quote_copy(
    value: *const SqlBufValue,
    out: *mut SqlBufString,
) -> SqlBufResult {
    run_quote(value, out, quote_copy)
}
