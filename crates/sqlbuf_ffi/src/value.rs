//! Values passed in from C.

use sqlbuf_core::{ConversionError, ToText, Value};

use crate::error::{set_last_error, SqlBufResult};

/// Tag of a [`SqlBufValue`].
pub type SqlBufValueKind = u32;

/// The null value.
pub const SQLBUF_NULL: SqlBufValueKind = 0;
/// UTF-8 text in `data`/`len`.
pub const SQLBUF_TEXT: SqlBufValueKind = 1;
/// Raw bytes in `data`/`len`.
pub const SQLBUF_BYTES: SqlBufValueKind = 2;
/// A signed integer in `int_value`, stringified on demand.
pub const SQLBUF_INT: SqlBufValueKind = 3;
/// A float in `float_value`, stringified on demand the way Python's `str()`
/// does: `1e+20`, `1.5`, `nan`, `-inf`.
pub const SQLBUF_FLOAT: SqlBufValueKind = 4;

/// A tagged value.
///
/// Only the fields selected by `kind` are read.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SqlBufValue {
    /// One of the `SQLBUF_*` tags.
    pub kind: SqlBufValueKind,
    /// Pointer to text or byte data. May be null when `len` is 0.
    pub data: *const u8,
    /// Length of `data` in bytes.
    pub len: usize,
    /// Payload for `SQLBUF_INT`.
    pub int_value: i64,
    /// Payload for `SQLBUF_FLOAT`.
    pub float_value: f64,
}

impl SqlBufValue {
    /// A null value.
    pub fn null() -> Self {
        Self::with_kind(SQLBUF_NULL)
    }

    /// A text value borrowing `s`.
    pub fn text(s: &str) -> Self {
        Self {
            data: s.as_ptr(),
            len: s.len(),
            ..Self::with_kind(SQLBUF_TEXT)
        }
    }

    /// A bytes value borrowing `b`.
    pub fn bytes(b: &[u8]) -> Self {
        Self {
            data: b.as_ptr(),
            len: b.len(),
            ..Self::with_kind(SQLBUF_BYTES)
        }
    }

    /// An integer value.
    pub fn int(v: i64) -> Self {
        Self {
            int_value: v,
            ..Self::with_kind(SQLBUF_INT)
        }
    }

    /// A float value.
    pub fn float(v: f64) -> Self {
        Self {
            float_value: v,
            ..Self::with_kind(SQLBUF_FLOAT)
        }
    }

    fn with_kind(kind: SqlBufValueKind) -> Self {
        Self {
            kind,
            data: std::ptr::null(),
            len: 0,
            int_value: 0,
            float_value: 0.0,
        }
    }

    unsafe fn data_slice<'a>(&self) -> Result<&'a [u8], SqlBufResult> {
        if self.data.is_null() {
            if self.len == 0 {
                return Ok(&[]);
            }
            set_last_error("null data pointer with non-zero length");
            return Err(SqlBufResult::NullPointer);
        }
        Ok(std::slice::from_raw_parts(self.data, self.len))
    }

    /// Borrows this value as a [`Value`], without copying text or bytes.
    ///
    /// # Safety
    ///
    /// `data` must point at `len` readable bytes that stay valid for `'a`.
    pub(crate) unsafe fn as_value<'a>(&self) -> Result<Value<'a>, SqlBufResult> {
        match self.kind {
            SQLBUF_NULL => Ok(Value::Null),
            SQLBUF_TEXT => {
                let bytes = self.data_slice()?;
                match std::str::from_utf8(bytes) {
                    Ok(s) => Ok(Value::from(s)),
                    Err(_) => {
                        set_last_error("text value is not valid UTF-8");
                        Err(SqlBufResult::InvalidArgument)
                    }
                }
            }
            SQLBUF_BYTES => Ok(Value::from(self.data_slice()?)),
            SQLBUF_INT => Ok(Value::from(self.int_value)),
            SQLBUF_FLOAT => Ok(Value::other(FloatText(self.float_value))),
            other => {
                set_last_error(format!("unknown value kind {other}"));
                Err(SqlBufResult::InvalidArgument)
            }
        }
    }
}

/// A float rendered with the shortest round-trip digits, switching to
/// exponent form outside `1e-4..1e16`.
#[derive(Debug, Clone, Copy)]
struct FloatText(f64);

impl ToText for FloatText {
    fn to_text(&self) -> Result<String, ConversionError> {
        Ok(format_float(self.0))
    }
}

fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v < 0.0 { "-inf" } else { "inf" }.to_string();
    }

    // `{:e}` yields the shortest digits, e.g. "-1.25e-7"
    let sci = format!("{:e}", v.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let sign = if v.is_sign_negative() { "-" } else { "" };

    if (-4..16).contains(&exp) {
        if exp < 0 {
            let zeros = "0".repeat((-exp - 1) as usize);
            return format!("{sign}0.{zeros}{digits}");
        }
        let point = exp as usize + 1;
        if digits.len() <= point {
            let zeros = "0".repeat(point - digits.len());
            return format!("{sign}{digits}{zeros}.0");
        }
        return format!("{sign}{}.{}", &digits[..point], &digits[point..]);
    }

    let (head, tail) = digits.split_at(1);
    let exp_sign = if exp < 0 { '-' } else { '+' };
    if tail.is_empty() {
        format!("{sign}{head}e{exp_sign}{:02}", exp.abs())
    } else {
        format!("{sign}{head}.{tail}e{exp_sign}{:02}", exp.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_borrows() {
        let s = "abc";
        let raw = SqlBufValue::text(s);
        let value = unsafe { raw.as_value() }.unwrap();
        assert_eq!(value.as_text(), Some("abc"));
        assert_eq!(value.as_text().map(str::as_ptr), Some(s.as_ptr()));
    }

    #[test]
    fn empty_bytes_with_null_pointer() {
        let raw = SqlBufValue {
            kind: SQLBUF_BYTES,
            ..SqlBufValue::null()
        };
        let value = unsafe { raw.as_value() }.unwrap();
        assert_eq!(value.as_bytes(), Some(&[][..]));
    }

    #[test]
    fn null_pointer_with_length_is_rejected() {
        let raw = SqlBufValue {
            kind: SQLBUF_TEXT,
            len: 3,
            ..SqlBufValue::null()
        };
        assert_eq!(
            unsafe { raw.as_value() }.unwrap_err(),
            SqlBufResult::NullPointer
        );
    }

    #[test]
    fn invalid_utf8_and_unknown_kind() {
        let bad = [0xffu8];
        let raw = SqlBufValue {
            kind: SQLBUF_TEXT,
            ..SqlBufValue::bytes(&bad)
        };
        assert_eq!(
            unsafe { raw.as_value() }.unwrap_err(),
            SqlBufResult::InvalidArgument
        );

        let raw = SqlBufValue {
            kind: 42,
            ..SqlBufValue::null()
        };
        assert_eq!(
            unsafe { raw.as_value() }.unwrap_err(),
            SqlBufResult::InvalidArgument
        );
    }

    #[test]
    fn numbers_are_other() {
        let value = unsafe { SqlBufValue::int(-7).as_value() }.unwrap();
        assert_eq!(value.type_name(), "other");
        let value = unsafe { SqlBufValue::float(0.5).as_value() }.unwrap();
        assert_eq!(value.type_name(), "other");
    }

    #[test]
    fn floats_render_like_python() {
        let cases = [
            (0.5, "0.5"),
            (1.0, "1.0"),
            (-0.0, "-0.0"),
            (123.456, "123.456"),
            (1e15, "1000000000000000.0"),
            (1e16, "1e+16"),
            (1e20, "1e+20"),
            (-1.5e-7, "-1.5e-07"),
            (0.0001, "0.0001"),
            (0.00012, "0.00012"),
            (1.25e300, "1.25e+300"),
            (f64::NAN, "nan"),
            (f64::INFINITY, "inf"),
            (f64::NEG_INFINITY, "-inf"),
        ];
        for (v, want) in cases {
            assert_eq!(format_float(v), want, "{v:?}");
        }
    }

    #[test]
    fn float_values_use_python_text() {
        for (v, want) in [(1e20, "1e+20"), (f64::NAN, "nan")] {
            let value = unsafe { SqlBufValue::float(v).as_value() }.unwrap();
            let view = sqlbuf_core::extract(&value).unwrap();
            assert_eq!(view.as_bytes(), want.as_bytes());
        }
    }
}
