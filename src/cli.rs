//! CLI argument parsing for soltx.

use crate::query::is_shortcut;
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

/// Decoder and query tool for serialized Solana transactions.
///
/// Inspect and query transactions encoded as base64 or base64url.
/// Think of it as "jq for Solana wire bytes."
#[derive(Parser, Debug)]
#[command(
    name = "soltx",
    version,
    about = "Decode and query serialized Solana transactions",
    after_help = r#"EXAMPLES:
    soltx AQAB...                          Show full transaction (pretty)
    soltx tx.b64                           Read base64 text from a file
    soltx 'https://host/?tx=AQAB...'       Take the `tx` parameter of a URL
    soltx 0x0100...                        Hex input
    cat tx.b64 | soltx                     Read from stdin
    soltx budget tx.b64                    Compute budget settings
    soltx instructions.0.data tx.b64       Nested field access
    soltx 'instructions[*].programId' tx.b64
                                           Wildcard (all program ids)
    soltx tx.b64 --json                    JSON output
    soltx tx.b64 --check                   Validate only (exit code)

QUERY SHORTCUTS:
    header        → message.header
    accounts      → message.accountKeys
    payer         → message.accountKeys.0
    blockhash     → message.recentBlockhash
    instructions  → message.instructions
    lookups       → message.addressTableLookups
    budget        → computeBudget
    cu_limit      → computeBudget.computeUnitLimit
    cu_price      → computeBudget.computeUnitPriceMicroLamports
    txid          → signatures.0"#
)]
pub struct Args {
    /// Query path or input (base64 text / file path / URL).
    /// If one argument: treated as input unless it looks like a query.
    /// If two arguments: first is query, second is input.
    #[arg(value_name = "QUERY_OR_INPUT")]
    pub first: Option<String>,

    /// Input when a query is provided.
    #[arg(value_name = "INPUT")]
    pub second: Option<String>,

    /// Output as JSON.
    #[arg(long, short = 'j', conflicts_with = "raw")]
    pub json: bool,

    /// Output bare values, one per line (strings unquoted).
    #[arg(long, short = 'r')]
    pub raw: bool,

    /// Validate only (exit code indicates result: 0=valid, 1=invalid).
    #[arg(long, short = 'c')]
    pub check: bool,

    /// Disable colored output.
    #[arg(long, env = "SOLTX_NO_COLOR")]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

/// Specifies how to obtain input bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    /// Read from stdin.
    Stdin,
    /// Read from a file path.
    File(PathBuf),
    /// Decode `0x`-prefixed hex (prefix stripped).
    Hex(String),
    /// Decode base64 / base64url text.
    Base64(String),
    /// Take the `tx` query parameter of a URL.
    Url(String),
}

/// File extensions that mark an argument as a path even if it does not exist.
const FILE_EXTENSIONS: [&str; 6] = [".b64", ".base64", ".txt", ".bin", ".tx", ".json"];

/// Top-level fields of the rendered transaction.
const TOP_LEVEL_FIELDS: [&str; 6] = [
    "version",
    "numSignatures",
    "signatures",
    "message",
    "computeBudget",
    "trailingBytes",
];

impl Args {
    /// Resolve the query and input from positional arguments.
    ///
    /// Returns (optional query path, input specification).
    pub fn resolve(&self) -> (Option<&str>, InputSpec) {
        match (&self.first, &self.second) {
            // No arguments: read from stdin, no query
            (None, None) => (None, InputSpec::Stdin),

            // One argument: could be query (with stdin) or input
            (Some(first), None) => {
                if Self::looks_like_query(first) {
                    (Some(first.as_str()), InputSpec::Stdin)
                } else {
                    (None, InputSpec::detect(first))
                }
            }

            // Two arguments: first is query, second is input
            (Some(query), Some(input)) => (Some(query.as_str()), InputSpec::detect(input)),

            // clap fills positionals in order
            (None, Some(input)) => (None, InputSpec::detect(input)),
        }
    }

    /// Heuristic to determine if a string looks like a query path.
    fn looks_like_query(s: &str) -> bool {
        if is_url(s) {
            return false;
        }

        let root = s.split(['.', '[']).next().unwrap_or(s);
        if is_shortcut(root) || TOP_LEVEL_FIELDS.contains(&root) {
            return true;
        }

        if has_file_extension(s) || Path::new(s).exists() {
            return false;
        }

        // Base64 never contains these
        s.contains('.') || s.contains('[') || s.contains('*')
    }
}

fn is_url(s: &str) -> bool {
    let s = s.trim();
    s.starts_with("http://") || s.starts_with("https://")
}

fn has_file_extension(s: &str) -> bool {
    FILE_EXTENSIONS.iter().any(|ext| s.ends_with(ext))
}

impl InputSpec {
    /// Detect input type from a string argument.
    pub fn detect(s: &str) -> Self {
        let trimmed = s.trim();

        if is_url(trimmed) {
            return InputSpec::Url(trimmed.to_string());
        }

        if let Some(hex_candidate) = trimmed.strip_prefix("0x") {
            if hex_candidate.chars().all(|c| c.is_ascii_hexdigit()) {
                return InputSpec::Hex(hex_candidate.to_string());
            }
        }

        if Path::new(s).exists() || has_file_extension(s) {
            return InputSpec::File(PathBuf::from(s));
        }

        InputSpec::Base64(trimmed.to_string())
    }
}
