//! Query shortcut expansion.

/// Get the expansion for a shortcut prefix.
fn shortcut_expansion(shortcut: &str) -> Option<&'static str> {
    match shortcut {
        "header" => Some("message.header"),
        "accounts" | "keys" => Some("message.accountKeys"),
        "payer" | "fee_payer" => Some("message.accountKeys.0"),
        "blockhash" => Some("message.recentBlockhash"),
        "instructions" | "ixs" => Some("message.instructions"),
        "lookups" => Some("message.addressTableLookups"),
        "budget" => Some("computeBudget"),
        "cu_limit" => Some("computeBudget.computeUnitLimit"),
        "cu_price" => Some("computeBudget.computeUnitPriceMicroLamports"),
        "priority_fee" => Some("computeBudget.prioritizationFeeLamports"),
        "txid" => Some("signatures.0"),
        _ => None,
    }
}

/// Whether `name` is a known shortcut.
pub fn is_shortcut(name: &str) -> bool {
    shortcut_expansion(name).is_some()
}

/// Expand a query shortcut to its full path.
///
/// Handles both exact matches and prefixes:
/// - `instructions` → `message.instructions`
/// - `instructions.0.data` → `message.instructions.0.data`
/// - `instructions[1]` → `message.instructions[1]`
pub fn expand_shortcut(query: &str) -> String {
    if let Some(expanded) = shortcut_expansion(query) {
        return expanded.to_string();
    }

    // Shortcut followed by a dot or a bracket
    if let Some(split) = query.find(['.', '[']) {
        let (prefix, rest) = query.split_at(split);
        if let Some(expanded_prefix) = shortcut_expansion(prefix) {
            return format!("{}{}", expanded_prefix, rest);
        }
    }

    query.to_string()
}
