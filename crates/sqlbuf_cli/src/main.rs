//! SQLBuf CLI
//!
//! Quote, unquote and inspect values from the command line.
//!
//! # Commands
//!
//! - `literal`, `copy`, `bytea` - Quote values for SQL and COPY
//! - `ident`, `fqident` - Quote identifiers
//! - `unquote`, `unescape` - Reverse SQL quoting
//! - `json`, `urlencode`, `urldecode`, `array` - Other encodings
//! - `dump` - Show the byte view extracted from a value

mod commands;

use clap::{Parser, Subcommand};
use sqlbuf_core::{Fallback, QuoteConfig, Quoter, DEFAULT_SCHEMA};
use tracing_subscriber::EnvFilter;

use commands::quote::ByteaStyle;
use commands::{Context, InputKind};

/// SQLBuf quoting and byte view tools.
///
/// Values are taken from the arguments, or one per line from stdin.
#[derive(Parser)]
#[command(name = "sqlbuf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Assume standard_conforming_strings is on when unquoting
    #[arg(global = true, long)]
    std_strings: bool,

    /// Schema used for unqualified names
    #[arg(global = true, long, default_value = DEFAULT_SCHEMA)]
    schema: String,

    /// Reject inputs that would need a text conversion
    #[arg(global = true, long)]
    strict: bool,

    /// How inputs are interpreted
    #[arg(global = true, short, long, value_enum, default_value_t = InputKind::Text)]
    input: InputKind,

    /// Treat inputs equal to this token as null
    #[arg(global = true, long)]
    null: Option<String>,

    /// Output format (text, json)
    #[arg(global = true, short, long, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote values as SQL literals
    Literal { values: Vec<String> },

    /// Quote values for COPY
    Copy { values: Vec<String> },

    /// Escape binary values for bytea
    Bytea {
        /// Escaping style
        #[arg(short, long, value_enum, default_value_t = ByteaStyle::Raw)]
        style: ByteaStyle,

        values: Vec<String>,
    },

    /// Quote identifiers
    Ident { values: Vec<String> },

    /// Quote schema-qualified identifiers
    Fqident { values: Vec<String> },

    /// Unquote SQL literals or identifiers
    Unquote {
        /// Unquote as a (qualified) identifier instead of a literal
        #[arg(long)]
        ident: bool,

        values: Vec<String>,
    },

    /// Resolve backslash escapes
    Unescape {
        /// Use COPY rules, where `\N` is null
        #[arg(long)]
        copy: bool,

        values: Vec<String>,
    },

    /// Quote values as JSON strings
    Json { values: Vec<String> },

    /// Encode KEY=VALUE pairs as a query string; a bare KEY is null
    Urlencode { pairs: Vec<String> },

    /// Decode query strings
    Urldecode { values: Vec<String> },

    /// Build a PostgreSQL array literal from all values
    Array { values: Vec<String> },

    /// Show the byte view extracted from each value
    Dump { values: Vec<String> },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let fallback = if cli.strict {
        Fallback::Forbidden
    } else {
        Fallback::Allowed
    };
    let config = QuoteConfig::new()
        .standard_conforming_strings(cli.std_strings)
        .default_schema(cli.schema)
        .fallback(fallback);
    let ctx = Context {
        quoter: Quoter::new(config),
        input: cli.input,
        null_token: cli.null,
        format: cli.format,
    };

    match cli.command {
        Commands::Literal { values } => {
            commands::quote::literal(&ctx, &commands::read_inputs(values)?)?;
        }
        Commands::Copy { values } => {
            commands::quote::copy(&ctx, &commands::read_inputs(values)?)?;
        }
        Commands::Bytea { style, values } => {
            commands::quote::bytea(&ctx, style, &commands::read_inputs(values)?)?;
        }
        Commands::Ident { values } => {
            commands::quote::ident(&ctx, &commands::read_inputs(values)?)?;
        }
        Commands::Fqident { values } => {
            commands::quote::fqident(&ctx, &commands::read_inputs(values)?)?;
        }
        Commands::Unquote { ident, values } => {
            commands::unquote::unquote(&ctx, ident, &commands::read_inputs(values)?)?;
        }
        Commands::Unescape { copy, values } => {
            commands::unquote::unescape(&ctx, copy, &commands::read_inputs(values)?)?;
        }
        Commands::Json { values } => {
            commands::quote::json(&ctx, &commands::read_inputs(values)?)?;
        }
        Commands::Urlencode { pairs } => {
            commands::quote::urlencode(&ctx, &commands::read_inputs(pairs)?)?;
        }
        Commands::Urldecode { values } => {
            commands::unquote::urldecode(&ctx, &commands::read_inputs(values)?)?;
        }
        Commands::Array { values } => {
            commands::quote::array(&ctx, &commands::read_inputs(values)?)?;
        }
        Commands::Dump { values } => {
            commands::dump::run(&ctx, &commands::read_inputs(values)?)?;
        }
        Commands::Version => {
            println!("SQLBuf CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("SQLBuf Core v{}", sqlbuf_core::VERSION);
        }
    }

    Ok(())
}
