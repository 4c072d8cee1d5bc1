//! soltx - decoder and query tool for serialized Solana transactions.
//!
//! A CLI tool for inspecting base64 or base64url encoded transactions in the
//! Solana wire format, legacy and versioned (V0) messages alike.
//! Think of it as "jq for Solana wire bytes."
//!
//! # Features
//!
//! - Read transactions from an argument, file, stdin, or a URL `tx` parameter
//! - Accept base64, base64url, `0x`-hex or raw wire bytes
//! - Decode signatures, header, account keys, blockhash and instructions
//! - Extract compute-budget settings (unit limit and unit price)
//! - Query specific fields with dot notation (e.g., `instructions.0.data`)
//! - Support wildcards (e.g., `instructions[*].programId`)
//! - Pretty terminal output with colors, JSON output for piping
//! - Validation mode with exit codes

pub mod cli;
pub mod decode;
pub mod error;
pub mod format;
pub mod input;
pub mod query;

pub use cli::Args;
pub use error::{Error, Result};

use decode::{DecodedTransaction, decode_transaction};
use format::format_output;
use input::{decode_base64, read_input};
use query::{execute_query, transaction_to_json};
use serde_json::Value as JsonValue;

/// Run soltx with the given arguments.
pub fn run(args: &Args) -> Result<()> {
    let (query_opt, input_spec) = args.resolve();
    log::debug!("input: {:?}, query: {:?}", input_spec, query_opt);

    let bytes = read_input(&input_spec)?;
    let tx = decode_transaction(&bytes)?;

    if args.check {
        return Ok(());
    }

    // An empty query selects the full transaction
    let query = query_opt.unwrap_or("");
    let result = execute_query(&tx, query)?;

    let output = format_output(&result, args)?;
    println!("{}", output);

    Ok(())
}

/// Decode base64 or base64url text into a transaction.
pub fn decode_text(text: &str) -> Result<DecodedTransaction> {
    let bytes = decode_base64(text.trim())?;
    Ok(decode_transaction(&bytes)?)
}

/// Decode base64 or base64url text into its JSON record.
///
/// On failure the single error message is returned instead, always prefixed
/// with `Error decoding transaction:`.
pub fn decode_to_json(text: &str) -> std::result::Result<JsonValue, String> {
    decode_text(text)
        .map(|tx| transaction_to_json(&tx))
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CodecError, DecodeError};
    use assert_matches::assert_matches;

    const LEGACY_B64: &str = include_str!("../tests/fixtures/legacy_transfer.b64");
    const V0_B64: &str = include_str!("../tests/fixtures/v0_lookup.b64");
    // Stake account activation signed by two keys, produced by a wallet
    const STAKE_B64: &str = include_str!("../tests/fixtures/marinade_stake.b64");

    #[test]
    fn test_decode_fixture() {
        let tx = decode_text(LEGACY_B64).unwrap();
        assert_eq!(tx.message().instructions.len(), 3);
        let budget = tx.compute_budget.unwrap();
        assert_eq!(budget.compute_unit_limit, Some(200_000));
        assert_eq!(budget.compute_unit_price_micro_lamports, Some(10_000));
    }

    #[test]
    fn test_base64url_equivalence() {
        let url_safe = V0_B64.trim().replace('+', "-").replace('/', "_");
        assert_ne!(url_safe, V0_B64.trim());
        assert_eq!(
            decode_to_json(&url_safe).unwrap(),
            decode_to_json(V0_B64).unwrap()
        );
    }

    #[test]
    fn test_unpadded_input() {
        let unpadded = V0_B64.trim().trim_end_matches('=');
        assert_ne!(unpadded, V0_B64.trim());
        assert_eq!(
            decode_to_json(unpadded).unwrap(),
            decode_to_json(V0_B64).unwrap()
        );
    }

    #[test]
    fn test_invalid_symbol() {
        assert_matches!(
            decode_text("AQ!B"),
            Err(Error::Decode(DecodeError::InvalidEncoding(_)))
        );
        let message = decode_to_json("AQ!B").unwrap_err();
        assert!(message.starts_with("Error decoding transaction:"), "{}", message);
    }

    #[test]
    fn test_truncated_transaction() {
        // Valid base64 for a lone signature count
        assert_matches!(
            decode_text("AQ=="),
            Err(Error::Codec(CodecError::MalformedSignature { count: 1, .. }))
        );
        let message = decode_to_json("AQ==").unwrap_err();
        assert!(message.starts_with("Error decoding transaction:"), "{}", message);
    }

    #[test]
    fn test_wallet_produced_transaction() {
        let json = decode_to_json(STAKE_B64).unwrap();
        assert_eq!(json["version"], "legacy");
        assert_eq!(json["numSignatures"], 2);
        assert_eq!(
            json["signatures"][1],
            "57gHeKzmszAyVA2nSBzYUJouqhFa1rDrLra7rjLqMtiUcoRFPGR3zeaBDfxCwYfnxSoWWA1sboJCEufsopax1KCp"
        );

        let message = &json["message"];
        assert_eq!(
            message["header"],
            serde_json::json!({
                "numRequiredSignatures": 2,
                "numReadonlySignedAccounts": 0,
                "numReadonlyUnsignedAccounts": 3
            })
        );
        assert_eq!(message["numAccountKeys"], 5);
        assert_eq!(
            message["accountKeys"][0],
            "5hr5fisPi6DXNuuRpm5XUbzpiEnmdyxXuBDTwzwZj5Pe"
        );
        assert_eq!(
            message["recentBlockhash"],
            "GHtXQBsoZHVnNFa9YevAzFr17DJjgHXk3ycTKD5xD3Zi"
        );

        let instructions = &message["instructions"];
        assert_eq!(message["numInstructions"], 2);
        assert_eq!(instructions[0]["programId"], "11111111111111111111111111111111");
        assert_eq!(instructions[0]["accountKeyIndexes"], serde_json::json!([0, 1]));
        assert_eq!(
            instructions[1]["programId"],
            "Stake11111111111111111111111111111111111111"
        );
        assert_eq!(instructions[1]["accountKeyIndexes"], serde_json::json!([1, 4]));

        assert!(json.get("computeBudget").is_none());
        assert!(json.get("trailingBytes").is_none());
    }

    #[test]
    fn test_wrapped_text() {
        let wrapped = include_str!("../tests/fixtures/legacy_transfer_wrapped.b64");
        assert!(wrapped.trim().contains('\n'));
        assert_eq!(
            decode_to_json(wrapped).unwrap(),
            decode_to_json(LEGACY_B64).unwrap()
        );
    }

    #[test]
    fn test_json_record() {
        let json = decode_to_json(V0_B64).unwrap();
        assert_eq!(json["version"], 0);
        assert_eq!(json["computeBudget"]["computeUnitLimit"], 300000);
        assert!(json["computeBudget"].get("computeUnitPriceMicroLamports").is_none());
    }
}
