//! Heap memory handed to C callers.
//!
//! Each handle owns an allocation made on the Rust side and must be given
//! back to the matching `sqlbuf_free_*` function exactly once.

use std::ffi::{c_char, CString};
use std::ptr;

use sqlbuf_core::Temporary;

/// Owner of the temporary created by `sqlbuf_get_buffer`.
///
/// After a fallback the buffer pointer returned to the caller points at
/// `data`, so the bytes stay readable until `sqlbuf_free_buffer` is called.
/// A null `data` means no temporary was created.
#[repr(C)]
#[derive(Debug)]
pub struct SqlBufBuffer {
    /// Start of the temporary.
    pub data: *mut u8,
    /// Length of the temporary in bytes.
    pub len: usize,
}

impl SqlBufBuffer {
    /// Leaks a temporary into a handle owned by the caller.
    pub(crate) fn from_temporary(temp: Temporary) -> Self {
        let bytes = temp.into_bytes().into_boxed_slice();
        let len = bytes.len();
        let data = Box::into_raw(bytes).cast::<u8>();
        Self { data, len }
    }
}

impl Default for SqlBufBuffer {
    fn default() -> Self {
        Self {
            data: ptr::null_mut(),
            len: 0,
        }
    }
}

/// Releases a temporary filled in by `sqlbuf_get_buffer`.
///
/// A handle with a null `data` is ignored.
///
/// # Safety
///
/// The handle must come from `sqlbuf_get_buffer` and not have been freed.
#[no_mangle]
pub unsafe extern "C" fn sqlbuf_free_buffer(buffer: SqlBufBuffer) {
    if !buffer.data.is_null() {
        drop(Box::from_raw(ptr::slice_from_raw_parts_mut(
            buffer.data,
            buffer.len,
        )));
    }
}

/// A NUL-terminated UTF-8 string produced by a quoting function.
///
/// Release with `sqlbuf_free_string`.
#[repr(C)]
#[derive(Debug)]
pub struct SqlBufString {
    /// The string; null when nothing was produced.
    pub ptr: *mut c_char,
    /// Length without the terminator.
    pub len: usize,
}

impl SqlBufString {
    /// Hands `s` over to C. Returns `None` if it contains a NUL byte.
    pub(crate) fn from_string(s: String) -> Option<Self> {
        let len = s.len();
        let ptr = CString::new(s).ok()?.into_raw();
        Some(Self { ptr, len })
    }
}

impl Default for SqlBufString {
    fn default() -> Self {
        Self {
            ptr: ptr::null_mut(),
            len: 0,
        }
    }
}

/// Releases a string filled in by a quoting function.
///
/// A null `ptr` is ignored.
///
/// # Safety
///
/// The string must come from a sqlbuf function and not have been freed.
#[no_mangle]
pub unsafe extern "C" fn sqlbuf_free_string(string: SqlBufString) {
    if !string.ptr.is_null() {
        drop(CString::from_raw(string.ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn temporary_is_exposed_in_place() {
        let buffer = SqlBufBuffer::from_temporary(Temporary::Text("42".to_string()));
        assert!(!buffer.data.is_null());
        assert_eq!(buffer.len, 2);

        let bytes = unsafe { std::slice::from_raw_parts(buffer.data, buffer.len) };
        assert_eq!(bytes, b"42");

        unsafe { sqlbuf_free_buffer(buffer) };
    }

    #[test]
    fn empty_temporary_can_be_freed() {
        let buffer = SqlBufBuffer::from_temporary(Temporary::Bytes(Vec::new()));
        assert_eq!(buffer.len, 0);
        unsafe { sqlbuf_free_buffer(buffer) };
        unsafe { sqlbuf_free_buffer(SqlBufBuffer::default()) };
    }

    #[test]
    fn string_is_nul_terminated() {
        let string = SqlBufString::from_string("'quoted'".to_string()).unwrap();
        assert_eq!(string.len, 8);

        let s = unsafe { CStr::from_ptr(string.ptr) };
        assert_eq!(s.to_str().unwrap(), "'quoted'");

        unsafe { sqlbuf_free_string(string) };
    }

    #[test]
    fn string_with_nul_byte_fails() {
        assert!(SqlBufString::from_string("a\0b".to_string()).is_none());
        assert!(SqlBufString::default().ptr.is_null());
    }
}
