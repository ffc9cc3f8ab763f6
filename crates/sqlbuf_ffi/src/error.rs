//! Error codes and the thread-local last error.

use std::cell::RefCell;
use std::ffi::CString;

use sqlbuf_core::{ErrorKind, ExtractError, QuoteError};

/// Result code for FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlBufResult {
    /// Operation succeeded.
    Ok = 0,
    /// Invalid argument (bad tag, invalid UTF-8, embedded NUL).
    InvalidArgument = 1,
    /// Null pointer.
    NullPointer = 2,
    /// Input of an unsupported type, e.g. a null value.
    TypeError = 3,
    /// Input of the right type with malformed contents.
    ValueError = 4,
    /// Converting a value to text failed.
    ConversionError = 5,
}

impl From<ErrorKind> for SqlBufResult {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::TypeError => SqlBufResult::TypeError,
            ErrorKind::ValueError => SqlBufResult::ValueError,
            ErrorKind::Conversion => SqlBufResult::ConversionError,
        }
    }
}

// Thread-local storage for last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Sets the last error message.
pub fn set_last_error(message: impl Into<String>) {
    let msg = message.into();
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clears the last error.
pub fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Records an extraction error and returns its code.
pub(crate) fn report_extract(err: &ExtractError) -> SqlBufResult {
    set_last_error(err.to_string());
    err.kind().into()
}

/// Records a quoting error and returns its code.
pub(crate) fn report_quote(err: &QuoteError) -> SqlBufResult {
    set_last_error(err.to_string());
    err.kind().into()
}

/// Gets the last error message as a C string.
///
/// Returns null if no error is set.
///
/// # Safety
///
/// The returned pointer is valid until the next FFI call on this thread.
#[no_mangle]
pub extern "C" fn sqlbuf_get_last_error() -> *const std::ffi::c_char {
    LAST_ERROR.with(|e| match e.borrow().as_ref() {
        Some(cstr) => cstr.as_ptr(),
        None => std::ptr::null(),
    })
}

/// Clears the last error message.
#[no_mangle]
pub extern "C" fn sqlbuf_clear_error() {
    clear_last_error();
}
