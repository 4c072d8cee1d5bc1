//! Pretty terminal output with colors and tables.

use crate::cli::Args;
use crate::decode::MessageHeader;
use crate::error::{Error, Result};
use crate::query::{QueryResult, QueryValue};
use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table, presets};
use serde_json::Value as JsonValue;

/// Format a query result as pretty terminal output.
pub fn format_pretty(result: &QueryResult, args: &Args) -> Result<String> {
    if args.no_color {
        colored::control::set_override(false);
    }

    match result {
        QueryResult::FullTransaction(json) => format_full_transaction(json),
        QueryResult::Single(value) => format_single_value(value),
        QueryResult::Multiple(values) => format_multiple_values(values),
    }
}

/// Format a full transaction.
fn format_full_transaction(json: &JsonValue) -> Result<String> {
    let mut output = String::new();

    let version = match json.get("version") {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Number(n)) => format!("v{}", n),
        _ => "unknown".to_string(),
    };

    output.push_str(&format!("{}\n", "Transaction".bold().cyan()));
    output.push_str(&format!("  {} {}\n", "Version:".dimmed(), version.yellow()));

    let signatures = json
        .get("signatures")
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();
    output.push_str(&format!(
        "  {} {}\n",
        "Signatures:".dimmed(),
        signatures.len()
    ));
    for signature in signatures.iter().filter_map(|v| v.as_str()) {
        output.push_str(&format!("    {}\n", truncate_middle(signature, 48)));
    }

    let Some(message) = json.get("message") else {
        return Ok(output);
    };

    if let Some(blockhash) = message.get("recentBlockhash").and_then(|v| v.as_str()) {
        output.push_str(&format!("  {} {}\n", "Blockhash:".dimmed(), blockhash));
    }
    output.push('\n');

    let header = message.get("header").map(header_from_json).unwrap_or_default();
    output.push_str(&format!("{}\n", "Header".bold().cyan()));
    output.push_str(&format!(
        "  {} {}\n",
        "Required signatures:".dimmed(),
        header.num_required_signatures
    ));
    output.push_str(&format!(
        "  {} {}\n",
        "Readonly signed:".dimmed(),
        header.num_readonly_signed_accounts
    ));
    output.push_str(&format!(
        "  {} {}\n\n",
        "Readonly unsigned:".dimmed(),
        header.num_readonly_unsigned_accounts
    ));

    if let Some(keys) = message.get("accountKeys").and_then(|v| v.as_array()) {
        output.push_str(&format!("{} ({})\n", "Accounts".bold().cyan(), keys.len()));
        output.push_str(&format_accounts_table(keys, &header));
        output.push('\n');
    }

    if let Some(instructions) = message.get("instructions").and_then(|v| v.as_array()) {
        output.push_str(&format!(
            "{} ({})\n",
            "Instructions".bold().cyan(),
            instructions.len()
        ));
        if instructions.is_empty() {
            output.push_str(&format!("  {}\n", "(none)".dimmed()));
        } else {
            output.push_str(&format_instructions_table(instructions));
        }
        output.push('\n');
    }

    if let Some(lookups) = message.get("addressTableLookups") {
        output.push_str(&format!("{}\n", "Address Table Lookups".bold().cyan()));
        output.push_str(&format_lookups(lookups));
        output.push('\n');
    }

    if let Some(budget) = json.get("computeBudget") {
        output.push_str(&format!("{}\n", "Compute Budget".bold().cyan()));
        output.push_str(&format_compute_budget(budget));
    }

    if let Some(trailing) = json.get("trailingBytes").and_then(|v| v.as_u64()) {
        output.push_str(&format!(
            "\n{} {} trailing byte(s) after the message\n",
            "warning:".yellow(),
            trailing
        ));
    }

    Ok(output)
}

fn header_from_json(header: &JsonValue) -> MessageHeader {
    let field = |name: &str| {
        header
            .get(name)
            .and_then(|v| v.as_u64())
            .and_then(|n| u8::try_from(n).ok())
            .unwrap_or(0)
    };
    MessageHeader {
        num_required_signatures: field("numRequiredSignatures"),
        num_readonly_signed_accounts: field("numReadonlySignedAccounts"),
        num_readonly_unsigned_accounts: field("numReadonlyUnsignedAccounts"),
    }
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(comfy_table::Color::DarkGrey))
            .collect::<Vec<_>>(),
    );
    table
}

/// Format static account keys with their access flags.
fn format_accounts_table(keys: &[JsonValue], header: &MessageHeader) -> String {
    let mut table = new_table(&["#", "Key", "Signer", "Writable"]);

    for (idx, key) in keys.iter().enumerate() {
        let key = key.as_str().unwrap_or("?");
        table.add_row(vec![
            Cell::new(idx),
            Cell::new(key),
            flag_cell(header.is_signer(idx)),
            flag_cell(header.is_writable(idx, keys.len())),
        ]);
    }

    format!("{}\n", table)
}

fn flag_cell(set: bool) -> Cell {
    if set {
        Cell::new("yes").fg(comfy_table::Color::Green)
    } else {
        Cell::new("-").fg(comfy_table::Color::DarkGrey)
    }
}

/// Format compiled instructions as a table.
fn format_instructions_table(instructions: &[JsonValue]) -> String {
    let mut table = new_table(&["#", "Program", "Accounts", "Data"]);

    for (idx, ix) in instructions.iter().enumerate() {
        let program = ix.get("programId").and_then(|v| v.as_str()).unwrap_or("?");
        let accounts = ix
            .get("accountKeyIndexes")
            .and_then(|v| v.as_array())
            .map(|indexes| {
                indexes
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        let data = ix.get("data").and_then(|v| v.as_str()).unwrap_or("");

        table.add_row(vec![
            Cell::new(idx),
            Cell::new(program),
            Cell::new(accounts),
            Cell::new(if data.is_empty() {
                "(empty)".to_string()
            } else {
                truncate_middle(data, 24)
            }),
        ]);
    }

    format!("{}\n", table)
}

fn format_lookups(lookups: &JsonValue) -> String {
    let mut output = String::new();
    let count = lookups.get("count").and_then(|v| v.as_u64()).unwrap_or(0);
    output.push_str(&format!("  {} {}\n", "Tables:".dimmed(), count));

    for (field, label) in [
        ("numLoadedWritable", "Loaded writable:"),
        ("numLoadedReadonly", "Loaded readonly:"),
    ] {
        if let Some(n) = lookups.get(field).and_then(|v| v.as_u64()) {
            output.push_str(&format!("  {} {}\n", label.dimmed(), n));
        }
    }

    if let Some(len) = lookups.get("byteLength").and_then(|v| v.as_u64()) {
        output.push_str(&format!("  {} {} bytes\n", "Section size:".dimmed(), len));
    }

    output
}

fn format_compute_budget(budget: &JsonValue) -> String {
    let mut output = String::new();

    if let Some(limit) = budget.get("computeUnitLimit").and_then(|v| v.as_u64()) {
        output.push_str(&format!(
            "  {} {} CU\n",
            "Unit limit:".dimmed(),
            format_number_with_separators(limit).yellow()
        ));
    }

    if let Some(price) = budget
        .get("computeUnitPriceMicroLamports")
        .and_then(|v| v.as_u64())
    {
        output.push_str(&format!(
            "  {} {} micro-lamports/CU\n",
            "Unit price:".dimmed(),
            format_number_with_separators(price).yellow()
        ));
    }

    if let Some(fee) = budget
        .get("prioritizationFeeLamports")
        .and_then(|v| v.as_u64())
    {
        output.push_str(&format!(
            "  {} {} lamports\n",
            "Priority fee:".dimmed(),
            format_number_with_separators(fee).yellow()
        ));
    }

    output
}

/// Format a single query value.
fn format_single_value(value: &QueryValue) -> Result<String> {
    match value {
        QueryValue::Null => Ok("null".dimmed().to_string()),
        QueryValue::Bool(b) => Ok(if *b {
            "true".green().to_string()
        } else {
            "false".red().to_string()
        }),
        QueryValue::Number(n) => Ok(n
            .as_u64()
            .map(format_number_with_separators)
            .unwrap_or_else(|| n.to_string())),
        QueryValue::String(s) => Ok(s.clone()),
        QueryValue::Array(arr) => {
            let items: Result<Vec<String>> = arr.iter().map(format_single_value).collect();
            Ok(format!("[{}]", items?.join(", ")))
        }
        QueryValue::Object(_) => {
            serde_json::to_string_pretty(value).map_err(|e| Error::FormatError(e.to_string()))
        }
    }
}

/// Format multiple query values (from wildcard).
fn format_multiple_values(values: &[QueryValue]) -> Result<String> {
    let formatted: Result<Vec<String>> = values
        .iter()
        .enumerate()
        .map(|(idx, v)| {
            let formatted = format_single_value(v)?;
            Ok(format!("[{}] {}", idx.to_string().dimmed(), formatted))
        })
        .collect();

    Ok(formatted?.join("\n"))
}

/// Format a number with thousand separators.
fn format_number_with_separators(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Shorten a base58 string for display, keeping both ends.
fn truncate_middle(s: &str, max_len: usize) -> String {
    // base58 is ASCII, so byte slicing is on char boundaries
    if s.len() <= max_len || !s.is_ascii() {
        s.to_string()
    } else {
        let half = (max_len - 3) / 2;
        format!("{}...{}", &s[..half], &s[s.len() - half..])
    }
}
