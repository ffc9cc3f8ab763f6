//! Dump command implementation.

use serde::Serialize;
use sqlbuf_core::extract_with;
use tracing::warn;

use super::{CommandResult, Context};

/// Extraction result for one input.
#[derive(Debug, Serialize)]
pub struct DumpResult {
    /// The input as given.
    pub input: String,
    /// Variant of the parsed value.
    pub kind: &'static str,
    /// Whether the view aliases the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero_copy: Option<bool>,
    /// Length of the view in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub len: Option<usize>,
    /// The viewed bytes, hex-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    /// Extraction error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runs the dump command.
///
/// Extraction failures are reported per input instead of aborting.
pub fn run(ctx: &Context, inputs: &[String]) -> CommandResult {
    let fallback = ctx.quoter.config().fallback;
    let mut results = Vec::with_capacity(inputs.len());

    for raw in inputs {
        let value = ctx.parse(raw)?;
        let mut result = DumpResult {
            input: raw.clone(),
            kind: value.type_name(),
            zero_copy: None,
            len: None,
            hex: None,
            error: None,
        };
        match extract_with(&value, fallback) {
            Ok(view) => {
                result.zero_copy = Some(view.is_zero_copy());
                result.len = Some(view.len());
                result.hex = Some(hex::encode(&*view));
            }
            Err(e) => {
                warn!(input = %raw, error = %e, "extraction failed");
                result.error = Some(e.to_string());
            }
        }
        results.push(result);
    }

    match ctx.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        "text" => print_results(&results),
        other => return Err(format!("unknown output format: {other}").into()),
    }
    Ok(())
}

fn print_results(results: &[DumpResult]) {
    for result in results {
        println!("{:?} ({})", result.input, result.kind);
        if let Some(error) = &result.error {
            println!("  error: {error}");
            continue;
        }
        println!("  Length:     {}", result.len.unwrap_or_default());
        println!("  Zero-copy:  {}", result.zero_copy.unwrap_or_default());
        println!("  Bytes:      {}", result.hex.as_deref().unwrap_or_default());
    }
}
