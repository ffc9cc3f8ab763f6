//! Quoting commands.

use clap::ValueEnum;
use sqlbuf_core::{quote_ident, quote_json, Value};
use tracing::debug;

use super::{emit, map_text, map_values, CommandResult, Context, Entry};

/// Output style of the `bytea` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ByteaStyle {
    /// Escaped for the bytea input parser.
    Raw,
    /// As an SQL literal.
    Literal,
    /// For COPY.
    Copy,
}

/// Runs the literal command.
pub fn literal(ctx: &Context, inputs: &[String]) -> CommandResult {
    map_values(ctx, inputs, |value| ctx.quoter.quote_literal(value).map(Some))
}

/// Runs the copy command.
pub fn copy(ctx: &Context, inputs: &[String]) -> CommandResult {
    map_values(ctx, inputs, |value| ctx.quoter.quote_copy(value).map(Some))
}

/// Runs the bytea command.
pub fn bytea(ctx: &Context, style: ByteaStyle, inputs: &[String]) -> CommandResult {
    map_values(ctx, inputs, |value| match style {
        ByteaStyle::Raw => ctx.quoter.quote_bytea_raw(value),
        ByteaStyle::Literal => ctx.quoter.quote_bytea_literal(value).map(Some),
        ByteaStyle::Copy => ctx.quoter.quote_bytea_copy(value).map(Some),
    })
}

/// Runs the ident command.
pub fn ident(ctx: &Context, inputs: &[String]) -> CommandResult {
    map_text(ctx, inputs, |s| Ok(Some(quote_ident(s))))
}

/// Runs the fqident command.
pub fn fqident(ctx: &Context, inputs: &[String]) -> CommandResult {
    map_text(ctx, inputs, |s| Ok(Some(ctx.quoter.quote_fqident(s))))
}

/// Runs the json command.
pub fn json(ctx: &Context, inputs: &[String]) -> CommandResult {
    map_text(ctx, inputs, |s| {
        let s = (!ctx.is_null(s)).then_some(s);
        Ok(Some(quote_json(s)))
    })
}

/// Runs the urlencode command.
///
/// Each pair is `KEY=VALUE`; the value is parsed like any other input. A
/// pair without `=` encodes a null value.
pub fn urlencode(ctx: &Context, pairs: &[String]) -> CommandResult {
    let mut parsed: Vec<(&str, Value<'_>)> = Vec::with_capacity(pairs.len());
    for pair in pairs {
        match pair.split_once('=') {
            Some((key, raw)) => parsed.push((key, ctx.parse(raw)?)),
            None => parsed.push((pair.as_str(), Value::Null)),
        }
    }
    debug!(pairs = parsed.len(), "encoding query string");

    let entry = Entry {
        input: pairs.join("&"),
        output: Some(ctx.quoter.db_urlencode(&parsed)?),
    };
    emit(&ctx.format, &[entry])
}

/// Runs the array command.
pub fn array(ctx: &Context, inputs: &[String]) -> CommandResult {
    let values = inputs
        .iter()
        .map(|raw| ctx.parse(raw))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(items = values.len(), "building array literal");

    let entry = Entry {
        input: inputs.join(","),
        output: Some(ctx.quoter.make_pgarray(&values)?),
    };
    emit(&ctx.format, &[entry])
}
