//! Unquoting and decoding commands.

use std::collections::BTreeMap;

use serde::Serialize;
use sqlbuf_core::{db_urldecode, unescape as unescape_text, unescape_copy, unquote_fqident};

use super::{map_text, CommandResult, Context};

/// Runs the unquote command.
pub fn unquote(ctx: &Context, ident: bool, inputs: &[String]) -> CommandResult {
    if ident {
        map_text(ctx, inputs, |s| unquote_fqident(s).map(Some))
    } else {
        map_text(ctx, inputs, |s| ctx.quoter.unquote_literal(s))
    }
}

/// Runs the unescape command.
pub fn unescape(ctx: &Context, copy: bool, inputs: &[String]) -> CommandResult {
    if copy {
        map_text(ctx, inputs, |s| Ok(unescape_copy(s)))
    } else {
        map_text(ctx, inputs, |s| Ok(Some(unescape_text(s))))
    }
}

/// A decoded query string.
#[derive(Debug, Serialize)]
pub struct DecodedQuery {
    /// The query string as given.
    pub input: String,
    /// Decoded fields; `None` marks a key without a value.
    pub fields: BTreeMap<String, Option<String>>,
}

/// Runs the urldecode command.
pub fn urldecode(ctx: &Context, inputs: &[String]) -> CommandResult {
    let decoded: Vec<DecodedQuery> = inputs
        .iter()
        .map(|qs| DecodedQuery {
            input: qs.clone(),
            fields: db_urldecode(qs),
        })
        .collect();

    match ctx.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&decoded)?);
        }
        "text" => {
            for query in &decoded {
                for (key, value) in &query.fields {
                    match value {
                        Some(value) => println!("{key}={value}"),
                        None => println!("{key}"),
                    }
                }
                println!();
            }
        }
        other => return Err(format!("unknown output format: {other}").into()),
    }
    Ok(())
}
