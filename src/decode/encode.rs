//! Transaction wire-format encoding.
//!
//! Writes the layout read by [`decode_transaction`](super::decode_transaction)
//! with canonical compact lengths, so decoding the output reproduces the
//! input record.

use crate::decode::short_vec::encode_len;
use crate::decode::transaction::{
    CompiledInstruction, MESSAGE_VERSION_PREFIX, TransactionVersion, VersionedTransaction,
};
use crate::error::CodecError;

fn compact_len(len: usize, what: &str) -> Result<u16, CodecError> {
    u16::try_from(len)
        .map_err(|_| CodecError::Malformed(format!("{} {} exceed a compact length", len, what)))
}

fn write_compact_bytes(bytes: &[u8], what: &str, out: &mut Vec<u8>) -> Result<(), CodecError> {
    encode_len(compact_len(bytes.len(), what)?, out);
    out.extend_from_slice(bytes);
    Ok(())
}

fn write_instruction(ix: &CompiledInstruction, out: &mut Vec<u8>) -> Result<(), CodecError> {
    out.push(ix.program_id_index);
    write_compact_bytes(&ix.accounts, "account indexes", out)?;
    write_compact_bytes(&ix.data, "data bytes", out)
}

/// Serialize the message portion (the bytes signatures cover).
pub fn encode_message(tx: &VersionedTransaction) -> Result<Vec<u8>, CodecError> {
    let message = &tx.message;
    let mut out = Vec::new();

    if tx.version == TransactionVersion::V0 {
        out.push(MESSAGE_VERSION_PREFIX);
    }

    out.extend_from_slice(&[
        message.header.num_required_signatures,
        message.header.num_readonly_signed_accounts,
        message.header.num_readonly_unsigned_accounts,
    ]);

    encode_len(compact_len(message.account_keys.len(), "account keys")?, &mut out);
    for key in &message.account_keys {
        out.extend_from_slice(key.as_bytes());
    }

    out.extend_from_slice(message.recent_blockhash.as_bytes());

    encode_len(compact_len(message.instructions.len(), "instructions")?, &mut out);
    for ix in &message.instructions {
        write_instruction(ix, &mut out)?;
    }

    match (tx.version, &message.address_table_lookups) {
        (TransactionVersion::V0, Some(lookups)) => {
            encode_len(lookups.count, &mut out);
            out.extend_from_slice(&lookups.raw);
        }
        (TransactionVersion::V0, None) => encode_len(0, &mut out),
        (TransactionVersion::Legacy, Some(_)) => {
            return Err(CodecError::Malformed(
                "legacy message cannot carry address table lookups".to_string(),
            ));
        }
        (TransactionVersion::Legacy, None) => {}
    }

    Ok(out)
}

/// Serialize a whole transaction: signatures followed by the message.
pub fn encode_transaction(tx: &VersionedTransaction) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();

    encode_len(compact_len(tx.signatures.len(), "signatures")?, &mut out);
    for signature in &tx.signatures {
        out.extend_from_slice(signature.as_bytes());
    }

    out.extend(encode_message(tx)?);
    Ok(out)
}
