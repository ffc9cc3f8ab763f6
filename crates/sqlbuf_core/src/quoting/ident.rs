//! Identifier quoting.

use crate::error::{QuoteError, QuoteResult};

/// Reserved keywords (reserved plus type/function-name keywords), sorted.
const RESERVED_KEYWORDS: &[&str] = &[
    "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric",
    "authorization", "between", "binary", "both", "case", "cast", "check", "collate",
    "collation", "column", "concurrently", "constraint", "create", "cross",
    "current_catalog", "current_date", "current_role", "current_schema", "current_time",
    "current_timestamp", "current_user", "default", "deferrable", "desc", "distinct", "do",
    "else", "end", "errors", "except", "false", "fetch", "for", "foreign", "freeze", "from",
    "full", "grant", "group", "having", "ilike", "in", "initially", "inner", "intersect",
    "into", "is", "isnull", "join", "lateral", "leading", "left", "like", "limit",
    "localtime", "localtimestamp", "natural", "new", "not", "notnull", "null", "off",
    "offset", "old", "on", "only", "or", "order", "outer", "over", "overlaps", "placing",
    "primary", "references", "returning", "right", "select", "session_user", "similar",
    "some", "symmetric", "table", "tablesample", "then", "to", "trailing", "true", "union",
    "unique", "user", "using", "variadic", "verbose", "when", "where", "window", "with",
];

/// Returns true if `word` is a reserved SQL keyword.
pub fn is_reserved_keyword(word: &str) -> bool {
    RESERVED_KEYWORDS.binary_search(&word).is_ok()
}

fn needs_quoting(s: &str) -> bool {
    let starts_with_digit = s.bytes().next().is_some_and(|b| b.is_ascii_digit());
    starts_with_digit
        || s.chars()
            .any(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'))
        || is_reserved_keyword(s)
}

/// Quotes an SQL identifier.
///
/// Names that are not plain lowercase identifiers, or that collide with a
/// reserved keyword, are wrapped in double quotes.
pub fn quote_ident(s: &str) -> String {
    if s.is_empty() {
        return "\"\"".to_string();
    }
    if needs_quoting(s) {
        return format!("\"{}\"", s.replace('"', "\"\""));
    }
    s.to_string()
}

/// Quotes a schema-qualified identifier, adding `schema` when it has none.
///
/// Only the first `.` separates schema from name.
pub(crate) fn quote_fqident(s: &str, schema: &str) -> String {
    match s.split_once('.') {
        Some((ns, name)) => format!("{}.{}", quote_ident(ns), quote_ident(name)),
        None => format!("{schema}.{}", quote_ident(s)),
    }
}

/// Unquotes a possibly quoted SQL identifier.
///
/// Unquoted names are folded to lowercase.
///
/// # Errors
///
/// Returns [`QuoteError::UnsupportedIdentSyntax`] if an unquoted name
/// contains a double quote after its first character.
pub fn unquote_ident(val: &str) -> QuoteResult<String> {
    if val.len() > 1 && val.starts_with('"') && val.ends_with('"') {
        return Ok(val[1..val.len() - 1].replace("\"\"", "\""));
    }
    if val.find('"').is_some_and(|pos| pos > 0) {
        return Err(QuoteError::UnsupportedIdentSyntax);
    }
    Ok(val.to_lowercase())
}

/// Unquotes a possibly quoted, schema-qualified identifier.
///
/// # Errors
///
/// See [`unquote_ident`].
pub fn unquote_fqident(val: &str) -> QuoteResult<String> {
    match val.split_once('.') {
        Some((ns, name)) => Ok(format!("{}.{}", unquote_ident(ns)?, unquote_ident(name)?)),
        None => unquote_ident(val),
    }
}
