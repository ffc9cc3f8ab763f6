//! CLI command implementations.

pub mod dump;
pub mod quote;
pub mod unquote;

use std::error::Error;
use std::io::{self, BufRead};

use clap::ValueEnum;
use serde::Serialize;
use sqlbuf_core::{QuoteResult, Quoter, Value};
use tracing::debug;

/// Result type of every command.
pub type CommandResult = Result<(), Box<dyn Error>>;

/// Printed in text output where a result is null.
const NULL_TEXT: &str = "NULL";

/// How raw inputs are turned into values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputKind {
    /// The input is used as text.
    Text,
    /// The input is hex and decodes to a byte sequence.
    Hex,
    /// The input is a number and gets stringified on extraction.
    Number,
}

/// Settings shared by all commands.
#[derive(Debug)]
pub struct Context {
    /// Quoter built from the global flags.
    pub quoter: Quoter,
    /// Input interpretation.
    pub input: InputKind,
    /// Inputs equal to this token are null.
    pub null_token: Option<String>,
    /// Output format (text, json).
    pub format: String,
}

impl Context {
    /// Turns a raw input into a value according to the input kind.
    pub fn parse<'a>(&self, raw: &'a str) -> Result<Value<'a>, Box<dyn Error>> {
        if self.null_token.as_deref() == Some(raw) {
            return Ok(Value::Null);
        }
        match self.input {
            InputKind::Text => Ok(Value::from(raw)),
            InputKind::Hex => Ok(Value::from(hex::decode(raw)?)),
            InputKind::Number => parse_number(raw),
        }
    }

    /// Returns true if the raw input stands for null.
    pub fn is_null(&self, raw: &str) -> bool {
        self.null_token.as_deref() == Some(raw)
    }
}

fn parse_number(raw: &str) -> Result<Value<'static>, Box<dyn Error>> {
    if let Ok(n) = raw.parse::<i64>() {
        return Ok(Value::from(n));
    }
    let f: f64 = raw
        .parse()
        .map_err(|_| format!("not a number: {raw:?}"))?;
    Ok(Value::from(f))
}

/// Returns `values`, or the lines of stdin when no values were given.
pub fn read_inputs(values: Vec<String>) -> io::Result<Vec<String>> {
    if !values.is_empty() {
        return Ok(values);
    }
    let lines = io::stdin().lock().lines().collect::<io::Result<Vec<_>>>()?;
    debug!(count = lines.len(), "read inputs from stdin");
    Ok(lines)
}

/// One input and its result.
#[derive(Debug, Serialize)]
pub struct Entry {
    /// The input as given.
    pub input: String,
    /// The result; `None` is null.
    pub output: Option<String>,
}

/// Prints entries in the requested format.
pub fn emit(format: &str, entries: &[Entry]) -> CommandResult {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(entries)?);
        }
        "text" => {
            for entry in entries {
                println!("{}", entry.output.as_deref().unwrap_or(NULL_TEXT));
            }
        }
        other => return Err(format!("unknown output format: {other}").into()),
    }
    Ok(())
}

/// Applies `op` to every input parsed as a value and prints the results.
pub(crate) fn map_values<F>(ctx: &Context, inputs: &[String], op: F) -> CommandResult
where
    F: Fn(&Value<'_>) -> QuoteResult<Option<String>>,
{
    let mut entries = Vec::with_capacity(inputs.len());
    for raw in inputs {
        let value = ctx.parse(raw)?;
        debug!(input = %raw, kind = value.type_name(), "processing value");
        entries.push(Entry {
            input: raw.clone(),
            output: op(&value)?,
        });
    }
    emit(&ctx.format, &entries)
}

/// Applies `op` to every input taken as plain text and prints the results.
pub(crate) fn map_text<F>(ctx: &Context, inputs: &[String], op: F) -> CommandResult
where
    F: Fn(&str) -> QuoteResult<Option<String>>,
{
    let mut entries = Vec::with_capacity(inputs.len());
    for raw in inputs {
        entries.push(Entry {
            input: raw.clone(),
            output: op(raw)?,
        });
    }
    emit(&ctx.format, &entries)
}
