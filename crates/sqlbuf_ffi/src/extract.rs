//! The byte view entry point.

use sqlbuf_core::{extract_with, ByteView, Fallback};

use crate::buffer::SqlBufBuffer;
use crate::error::{clear_last_error, report_extract, set_last_error};
use crate::value::SqlBufValue;

/// Gets a pointer to the bytes of a value.
///
/// # Arguments
///
/// * `value` - The value to read
/// * `buf_p` - Receives a pointer to the bytes
/// * `tmp_p` - Receives a temporary if one had to be created; may be null
///
/// # Returns
///
/// The number of bytes, or -1 on error. The message is available from
/// `sqlbuf_get_last_error`.
///
/// Text and bytes values are not copied: `*buf_p` points into
/// `value->data`. Integers and floats are stringified into a temporary
/// written to `*tmp_p`, which `*buf_p` then points into; release it with
/// `sqlbuf_free_buffer` once done with the bytes. Passing a null `tmp_p`
/// disallows the temporary, and such values fail instead. On error `*tmp_p`
/// is left untouched.
///
/// # Safety
///
/// - `value` must be a valid pointer whose `data` covers `len` bytes
/// - `buf_p` must be a valid pointer
/// - `tmp_p` must be null or a valid pointer
#[no_mangle]
pub unsafe extern "C" fn sqlbuf_get_buffer(
    value: *const SqlBufValue,
    buf_p: *mut *const u8,
    tmp_p: *mut SqlBufBuffer,
) -> isize {
    clear_last_error();

    if value.is_null() || buf_p.is_null() {
        set_last_error("null pointer argument");
        return -1;
    }

    let value = match (*value).as_value() {
        Ok(v) => v,
        Err(_) => return -1,
    };

    let fallback = if tmp_p.is_null() {
        Fallback::Forbidden
    } else {
        Fallback::Allowed
    };

    let view = match extract_with(&value, fallback) {
        Ok(view) => view,
        Err(e) => {
            report_extract(&e);
            return -1;
        }
    };

    let Ok(len) = isize::try_from(view.len()) else {
        set_last_error("buffer too large");
        return -1;
    };

    match view {
        ByteView::ZeroCopy(bytes) => {
            *buf_p = bytes.as_ptr();
        }
        ByteView::Owned(temp) => {
            let buffer = SqlBufBuffer::from_temporary(temp);
            *buf_p = buffer.data;
            *tmp_p = buffer;
        }
    }
    len
}
