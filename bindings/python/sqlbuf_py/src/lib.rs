//! Python bindings for sqlbuf.
//!
//! This crate provides Python bindings using PyO3. Python objects map onto
//! [`Value`] as follows: `None` is null, `str` is text, `bytes` is viewed
//! in place, `bytearray` and `memoryview` are copied, and anything else is
//! passed through `str()` when its bytes are needed.

use std::collections::BTreeMap;

use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyByteArray, PyBytes, PyDict, PyMemoryView, PyString};
use sqlbuf_core::{
    ConversionError, ErrorKind, ExtractError, Fallback, QuoteConfig, QuoteError,
    Quoter as CoreQuoter, ToText, Value,
};

/// Library version.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// An arbitrary Python object, stringified with `str()` on demand.
#[derive(Debug)]
struct PyDisplay(Py<PyAny>);

impl ToText for PyDisplay {
    fn to_text(&self) -> Result<String, ConversionError> {
        Python::with_gil(|py| {
            let text = self.0.bind(py).str().map_err(ConversionError::from_source)?;
            text.to_str()
                .map(str::to_owned)
                .map_err(ConversionError::from_source)
        })
    }
}

/// Borrows a Python object as a [`Value`].
fn to_value<'a>(obj: &'a Bound<'_, PyAny>) -> PyResult<Value<'a>> {
    if obj.is_none() {
        return Ok(Value::Null);
    }
    if let Ok(bytes) = obj.downcast::<PyBytes>() {
        return Ok(Value::from(bytes.as_bytes()));
    }
    if let Ok(text) = obj.downcast::<PyString>() {
        return Ok(Value::from(text.to_str()?));
    }
    if let Ok(array) = obj.downcast::<PyByteArray>() {
        return Ok(Value::from(array.to_vec()));
    }
    if obj.is_instance_of::<PyMemoryView>() {
        let copied: Vec<u8> = obj.call_method0("tobytes")?.extract()?;
        return Ok(Value::from(copied));
    }
    Ok(Value::other(PyDisplay(obj.clone().unbind())))
}

/// Converts an extraction error, re-raising the original exception when a
/// `__str__` call failed.
fn extract_err(err: ExtractError) -> PyErr {
    match err {
        ExtractError::Conversion(inner) => {
            let message = inner.message().to_string();
            match inner.into_source().map(|source| source.downcast::<PyErr>()) {
                Some(Ok(py_err)) => *py_err,
                _ => PyValueError::new_err(message),
            }
        }
        other => PyTypeError::new_err(other.to_string()),
    }
}

fn quote_err(err: QuoteError) -> PyErr {
    match err {
        QuoteError::Extract(inner) => extract_err(inner),
        other if other.kind() == ErrorKind::TypeError => PyTypeError::new_err(other.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Returns the bytes of an object: UTF-8 for `str`, the object itself for
/// `bytes`, and `str(obj)` encoded as UTF-8 for anything else.
#[pyfunction]
fn get_buffer<'py>(py: Python<'py>, obj: &Bound<'py, PyAny>) -> PyResult<Bound<'py, PyBytes>> {
    let value = to_value(obj)?;
    let view = sqlbuf_core::extract(&value).map_err(extract_err)?;
    Ok(PyBytes::new(py, &view))
}

/// PostgreSQL 8.3 `hashtext()` of the object's bytes.
#[pyfunction]
fn hashtext_old(value: &Bound<'_, PyAny>) -> PyResult<i32> {
    sqlbuf_core::hashtext_old(&to_value(value)?).map_err(extract_err)
}

/// PostgreSQL 8.4+ `hashtext()` of the object's bytes.
#[pyfunction]
fn hashtext_new(value: &Bound<'_, PyAny>) -> PyResult<i32> {
    sqlbuf_core::hashtext_new(&to_value(value)?).map_err(extract_err)
}

/// Quotes a literal value for SQL. `None` becomes `null`.
#[pyfunction]
fn quote_literal(value: &Bound<'_, PyAny>) -> PyResult<String> {
    sqlbuf_core::quote_literal(&to_value(value)?).map_err(quote_err)
}

/// Quoting for the COPY command. `None` becomes `\N`.
#[pyfunction]
fn quote_copy(value: &Bound<'_, PyAny>) -> PyResult<String> {
    sqlbuf_core::quote_copy(&to_value(value)?).map_err(quote_err)
}

/// Quoting for the bytea parser. `None` stays `None`.
#[pyfunction]
fn quote_bytea_raw(value: &Bound<'_, PyAny>) -> PyResult<Option<String>> {
    sqlbuf_core::quote_bytea_raw(&to_value(value)?).map_err(quote_err)
}

/// Quotes bytea for regular SQL.
#[pyfunction]
fn quote_bytea_literal(value: &Bound<'_, PyAny>) -> PyResult<String> {
    sqlbuf_core::quote_bytea_literal(&to_value(value)?).map_err(quote_err)
}

/// Quotes bytea for COPY.
#[pyfunction]
fn quote_bytea_copy(value: &Bound<'_, PyAny>) -> PyResult<String> {
    sqlbuf_core::quote_bytea_copy(&to_value(value)?).map_err(quote_err)
}

/// Quotes an SQL identifier.
#[pyfunction]
fn quote_ident(s: &str) -> String {
    sqlbuf_core::quote_ident(s)
}

/// Quotes a fully qualified SQL identifier.
#[pyfunction]
fn quote_fqident(s: &str) -> String {
    sqlbuf_core::quote_fqident(s)
}

/// Unquotes a possibly quoted SQL identifier.
#[pyfunction]
fn unquote_ident(val: &str) -> PyResult<String> {
    sqlbuf_core::unquote_ident(val).map_err(quote_err)
}

/// Unquotes a fully qualified, possibly quoted SQL identifier.
#[pyfunction]
fn unquote_fqident(val: &str) -> PyResult<String> {
    sqlbuf_core::unquote_fqident(val).map_err(quote_err)
}

/// Unquotes an SQL literal.
#[pyfunction]
#[pyo3(signature = (val, stdstr=false))]
fn unquote_literal(val: &str, stdstr: bool) -> PyResult<Option<String>> {
    sqlbuf_core::unquote_literal(val, stdstr).map_err(quote_err)
}

/// Removes C-style escapes.
#[pyfunction]
fn unescape(val: &str) -> String {
    sqlbuf_core::unescape(val)
}

/// Removes C-style escapes; `\N` becomes `None`.
#[pyfunction]
fn unescape_copy(val: &str) -> Option<String> {
    sqlbuf_core::unescape_copy(val)
}

/// JSON style quoting.
#[pyfunction]
#[pyo3(signature = (s=None))]
fn quote_json(s: Option<&str>) -> String {
    sqlbuf_core::quote_json(s)
}

/// Database specific urlencode: `None` values become a bare key.
#[pyfunction]
fn db_urlencode(dict_val: &Bound<'_, PyDict>) -> PyResult<String> {
    let mut items = Vec::with_capacity(dict_val.len());
    for (key, value) in dict_val.iter() {
        items.push((key.str()?.to_str()?.to_owned(), value));
    }
    let pairs = items
        .iter()
        .map(|(key, value)| Ok((key.as_str(), to_value(value)?)))
        .collect::<PyResult<Vec<_>>>()?;
    sqlbuf_core::db_urlencode(&pairs).map_err(quote_err)
}

/// Database specific urldecode: a key without `=` decodes to `None`.
#[pyfunction]
fn db_urldecode(qs: &str) -> BTreeMap<String, Option<String>> {
    sqlbuf_core::db_urldecode(qs)
}

/// Formats a sequence as a Postgres array literal.
#[pyfunction]
fn make_pgarray<'py>(lst: Vec<Bound<'py, PyAny>>) -> PyResult<String> {
    let items = lst.iter().map(to_value).collect::<PyResult<Vec<_>>>()?;
    sqlbuf_core::make_pgarray(&items).map_err(quote_err)
}

/// Quoting with custom settings.
#[pyclass]
pub struct Quoter {
    inner: CoreQuoter,
}

#[pymethods]
impl Quoter {
    /// Creates a quoter.
    ///
    /// `strict` disables the `str()` fallback for objects that are neither
    /// text nor bytes.
    #[new]
    #[pyo3(signature = (stdstr=false, default_schema="public", strict=false))]
    fn new(stdstr: bool, default_schema: &str, strict: bool) -> Self {
        let fallback = if strict {
            Fallback::Forbidden
        } else {
            Fallback::Allowed
        };
        let config = QuoteConfig::new()
            .standard_conforming_strings(stdstr)
            .default_schema(default_schema)
            .fallback(fallback);
        Self {
            inner: CoreQuoter::new(config),
        }
    }

    /// Quotes a literal value for SQL.
    fn quote_literal(&self, value: &Bound<'_, PyAny>) -> PyResult<String> {
        self.inner
            .quote_literal(&to_value(value)?)
            .map_err(quote_err)
    }

    /// Quoting for the COPY command.
    fn quote_copy(&self, value: &Bound<'_, PyAny>) -> PyResult<String> {
        self.inner.quote_copy(&to_value(value)?).map_err(quote_err)
    }

    /// Quotes a fully qualified SQL identifier.
    fn quote_fqident(&self, s: &str) -> String {
        self.inner.quote_fqident(s)
    }

    /// Unquotes an SQL literal using the configured string semantics.
    fn unquote_literal(&self, val: &str) -> PyResult<Option<String>> {
        self.inner.unquote_literal(val).map_err(quote_err)
    }

    fn __repr__(&self) -> String {
        let config = self.inner.config();
        format!(
            "Quoter(stdstr={}, default_schema={:?}, strict={})",
            config.standard_conforming_strings,
            config.default_schema,
            config.fallback == Fallback::Forbidden
        )
    }
}

/// Python module initialization.
#[pymodule]
fn sqlbuf(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Quoter>()?;
    m.add_function(wrap_pyfunction!(get_buffer, m)?)?;
    m.add_function(wrap_pyfunction!(hashtext_old, m)?)?;
    m.add_function(wrap_pyfunction!(hashtext_new, m)?)?;
    m.add_function(wrap_pyfunction!(quote_literal, m)?)?;
    m.add_function(wrap_pyfunction!(quote_copy, m)?)?;
    m.add_function(wrap_pyfunction!(quote_bytea_raw, m)?)?;
    m.add_function(wrap_pyfunction!(quote_bytea_literal, m)?)?;
    m.add_function(wrap_pyfunction!(quote_bytea_copy, m)?)?;
    m.add_function(wrap_pyfunction!(quote_ident, m)?)?;
    m.add_function(wrap_pyfunction!(quote_fqident, m)?)?;
    m.add_function(wrap_pyfunction!(unquote_ident, m)?)?;
    m.add_function(wrap_pyfunction!(unquote_fqident, m)?)?;
    m.add_function(wrap_pyfunction!(unquote_literal, m)?)?;
    m.add_function(wrap_pyfunction!(unescape, m)?)?;
    m.add_function(wrap_pyfunction!(unescape_copy, m)?)?;
    m.add_function(wrap_pyfunction!(quote_json, m)?)?;
    m.add_function(wrap_pyfunction!(db_urlencode, m)?)?;
    m.add_function(wrap_pyfunction!(db_urldecode, m)?)?;
    m.add_function(wrap_pyfunction!(make_pgarray, m)?)?;
    m.add_function(wrap_pyfunction!(version, m)?)?;
    Ok(())
}

/// Returns the sqlbuf library version.
#[pyfunction]
fn version() -> &'static str {
    VERSION
}
