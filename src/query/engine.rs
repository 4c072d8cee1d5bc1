//! Query execution engine.

use crate::decode::{DecodedTransaction, TransactionVersion};
use crate::error::{Error, Result};
use crate::query::path::{PathSegment, QueryPath};
use crate::query::shortcuts::expand_shortcut;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Result of a query execution.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    /// The full transaction.
    FullTransaction(JsonValue),
    /// A single value.
    Single(QueryValue),
    /// Multiple values (from wildcard expansion).
    Multiple(Vec<QueryValue>),
}

/// A queryable value.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<QueryValue>),
    Object(serde_json::Map<String, JsonValue>),
}

impl From<JsonValue> for QueryValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => QueryValue::Null,
            JsonValue::Bool(b) => QueryValue::Bool(b),
            JsonValue::Number(n) => QueryValue::Number(n),
            JsonValue::String(s) => QueryValue::String(s),
            JsonValue::Array(arr) => {
                QueryValue::Array(arr.into_iter().map(QueryValue::from).collect())
            }
            JsonValue::Object(map) => QueryValue::Object(map),
        }
    }
}

/// Execute a query against a decoded transaction.
pub fn execute_query(tx: &DecodedTransaction, query: &str) -> Result<QueryResult> {
    let expanded = expand_shortcut(query);
    let path = QueryPath::parse(&expanded)?;

    let tx_json = transaction_to_json(tx);

    if path.is_empty() {
        return Ok(QueryResult::FullTransaction(tx_json));
    }

    if path.has_wildcard() {
        let results = execute_path_with_wildcards(&tx_json, &path.segments)?;
        Ok(QueryResult::Multiple(results))
    } else {
        let result = execute_path(&tx_json, &path.segments)?;
        Ok(QueryResult::Single(result))
    }
}

/// Render a decoded transaction as a JSON document.
///
/// Keys, signatures, the blockhash and instruction data are base58 strings.
pub fn transaction_to_json(tx: &DecodedTransaction) -> JsonValue {
    let message = tx.message();

    let version = match tx.version() {
        TransactionVersion::Legacy => serde_json::json!("legacy"),
        TransactionVersion::V0 => serde_json::json!(0),
    };

    let signatures: Vec<String> = tx.signatures().iter().map(ToString::to_string).collect();
    let account_keys: Vec<String> = message
        .account_keys
        .iter()
        .map(ToString::to_string)
        .collect();

    let instructions: Vec<JsonValue> = message
        .instructions
        .iter()
        .map(|ix| {
            // Indexes were validated while decoding
            let program_id = message
                .program_id(ix)
                .map(ToString::to_string)
                .unwrap_or_default();
            serde_json::json!({
                "programId": program_id,
                "programIdIndex": ix.program_id_index,
                "accountKeyIndexes": ix.accounts,
                "data": bs58::encode(&ix.data).into_string()
            })
        })
        .collect();

    let header = &message.header;
    let mut message_json = serde_json::json!({
        "header": {
            "numRequiredSignatures": header.num_required_signatures,
            "numReadonlySignedAccounts": header.num_readonly_signed_accounts,
            "numReadonlyUnsignedAccounts": header.num_readonly_unsigned_accounts
        },
        "numAccountKeys": account_keys.len(),
        "accountKeys": account_keys,
        "recentBlockhash": message.recent_blockhash.to_string(),
        "numInstructions": instructions.len(),
        "instructions": instructions
    });

    if let Some(lookups) = &message.address_table_lookups {
        message_json["addressTableLookups"] = serde_json::json!({
            "count": lookups.count,
            "byteLength": lookups.span.len(),
            "numLoadedWritable": lookups.num_loaded_writable,
            "numLoadedReadonly": lookups.num_loaded_readonly
        });
    }

    let mut json = serde_json::json!({
        "version": version,
        "numSignatures": signatures.len(),
        "signatures": signatures,
        "message": message_json
    });

    if let Some(budget) = &tx.compute_budget {
        let mut budget_json = serde_json::json!(budget);
        if let Some(fee) = budget.prioritization_fee_lamports() {
            budget_json["prioritizationFeeLamports"] = serde_json::json!(fee);
        }
        json["computeBudget"] = budget_json;
    }

    if tx.trailing_bytes > 0 {
        json["trailingBytes"] = serde_json::json!(tx.trailing_bytes);
    }

    json
}

/// Execute a path query without wildcards.
fn execute_path(value: &JsonValue, segments: &[PathSegment]) -> Result<QueryValue> {
    let mut current = value;

    for segment in segments {
        current = match segment {
            PathSegment::Field(name) => current
                .get(name)
                .ok_or_else(|| Error::FieldNotFound(name.clone()))?,
            PathSegment::Index(idx) => current.get(*idx).ok_or(Error::IndexOutOfBounds(*idx))?,
            PathSegment::Wildcard => {
                return Err(Error::InvalidQuery(
                    "Unexpected wildcard in non-wildcard path".to_string(),
                ));
            }
        };
    }

    Ok(QueryValue::from(current.clone()))
}

/// Execute a path query with wildcards, returning all matching values.
fn execute_path_with_wildcards(
    value: &JsonValue,
    segments: &[PathSegment],
) -> Result<Vec<QueryValue>> {
    let Some((current_segment, rest)) = segments.split_first() else {
        return Ok(vec![QueryValue::from(value.clone())]);
    };

    match current_segment {
        PathSegment::Field(name) => {
            let next = value
                .get(name)
                .ok_or_else(|| Error::FieldNotFound(name.clone()))?;
            execute_path_with_wildcards(next, rest)
        }
        PathSegment::Index(idx) => {
            let next = value.get(*idx).ok_or(Error::IndexOutOfBounds(*idx))?;
            execute_path_with_wildcards(next, rest)
        }
        PathSegment::Wildcard => {
            let arr = value
                .as_array()
                .ok_or_else(|| Error::InvalidQuery("Wildcard on non-array".to_string()))?;

            let mut results = Vec::new();
            for item in arr {
                results.extend(execute_path_with_wildcards(item, rest)?);
            }
            Ok(results)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_transaction, encode_transaction};
    use crate::decode::test_utils::{legacy_transfer, v0_with_lookup};

    fn decoded_legacy() -> DecodedTransaction {
        decode_transaction(&encode_transaction(&legacy_transfer()).unwrap()).unwrap()
    }

    fn decoded_v0() -> DecodedTransaction {
        decode_transaction(&encode_transaction(&v0_with_lookup()).unwrap()).unwrap()
    }

    #[test]
    fn test_legacy_json_shape() {
        let json = transaction_to_json(&decoded_legacy());
        assert_eq!(json["version"], "legacy");
        assert_eq!(json["numSignatures"], 1);
        assert_eq!(
            json["signatures"][0],
            "BUguQsv2ZuHus54HAFzjdJHzZBkygAjKhEeYwSG19tUfUyvvz3worsdQCdAXDNjakJHioSiyxhFiDJrm8XpSXRA"
        );
        assert_eq!(json["message"]["header"]["numReadonlyUnsignedAccounts"], 2);
        assert_eq!(json["message"]["numAccountKeys"], 4);
        assert_eq!(
            json["message"]["accountKeys"][0],
            "4vJ9JU1bJJE96FWSJKvHsmmFADCg4gpZQff4P3bkLKi"
        );
        assert_eq!(
            json["message"]["recentBlockhash"],
            "US517G5965aydkZ46HS38QLi7UQiSojurfbQfKCELFx"
        );
        assert!(json["message"].get("addressTableLookups").is_none());
        assert!(json.get("trailingBytes").is_none());
    }

    #[test]
    fn test_instruction_json() {
        let json = transaction_to_json(&decoded_legacy());
        let ix = &json["message"]["instructions"][0];
        assert_eq!(ix["programId"], "ComputeBudget111111111111111111111111111111");
        assert_eq!(ix["programIdIndex"], 3);
        assert_eq!(ix["data"], "Fj2Eoy");

        let transfer = &json["message"]["instructions"][2];
        assert_eq!(transfer["programId"], "11111111111111111111111111111111");
        assert_eq!(transfer["accountKeyIndexes"], serde_json::json!([0, 1]));
        assert_eq!(transfer["data"], "3Bxs4Bc3VYuGVB19");
    }

    #[test]
    fn test_compute_budget_json() {
        let json = transaction_to_json(&decoded_legacy());
        assert_eq!(
            json["computeBudget"],
            serde_json::json!({
                "computeUnitLimit": 200000,
                "computeUnitPriceMicroLamports": 10000,
                "prioritizationFeeLamports": 2000
            })
        );
    }

    #[test]
    fn test_v0_json() {
        let json = transaction_to_json(&decoded_v0());
        assert_eq!(json["version"], 0);
        assert_eq!(
            json["message"]["addressTableLookups"],
            serde_json::json!({
                "count": 1,
                "byteLength": 36,
                "numLoadedWritable": 1,
                "numLoadedReadonly": 1
            })
        );
        // Limit only: no price, no fee
        assert_eq!(
            json["computeBudget"],
            serde_json::json!({ "computeUnitLimit": 300000 })
        );
    }

    #[test]
    fn test_no_budget_field_without_instruction() {
        let mut tx = legacy_transfer();
        tx.message.instructions.truncate(0);
        let decoded = decode_transaction(&encode_transaction(&tx).unwrap()).unwrap();
        let json = transaction_to_json(&decoded);
        assert!(json.get("computeBudget").is_none());
        assert_eq!(json["message"]["numInstructions"], 0);
    }

    #[test]
    fn test_execute_query_shortcuts() {
        let tx = decoded_legacy();
        match execute_query(&tx, "cu_limit").unwrap() {
            QueryResult::Single(QueryValue::Number(n)) => assert_eq!(n.as_u64(), Some(200_000)),
            other => panic!("Expected number, got {:?}", other),
        }
        match execute_query(&tx, "payer").unwrap() {
            QueryResult::Single(QueryValue::String(s)) => {
                assert_eq!(s, "4vJ9JU1bJJE96FWSJKvHsmmFADCg4gpZQff4P3bkLKi")
            }
            other => panic!("Expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_execute_query_full() {
        assert!(matches!(
            execute_query(&decoded_legacy(), "").unwrap(),
            QueryResult::FullTransaction(_)
        ));
    }

    #[test]
    fn test_execute_query_wildcard() {
        match execute_query(&decoded_legacy(), "instructions[*].programIdIndex").unwrap() {
            QueryResult::Multiple(values) => assert_eq!(values.len(), 3),
            other => panic!("Expected multiple, got {:?}", other),
        }
    }

    #[test]
    fn test_field_not_found() {
        let json = serde_json::json!({ "message": {} });
        let segments = vec![
            PathSegment::Field("message".into()),
            PathSegment::Field("nonexistent".into()),
        ];

        let result = execute_path(&json, &segments);
        assert!(matches!(result, Err(Error::FieldNotFound(_))));
    }

    #[test]
    fn test_index_out_of_bounds() {
        let result = execute_query(&decoded_legacy(), "signatures.10");
        assert!(matches!(result, Err(Error::IndexOutOfBounds(10))));
    }

    #[test]
    fn test_wildcard_on_object() {
        let result = execute_query(&decoded_legacy(), "header.*");
        assert!(matches!(result, Err(Error::InvalidQuery(_))));
    }
}
