//! Transaction wire-format decoding.

mod compute_budget;
mod cursor;
mod encode;
mod keys;
mod short_vec;
mod transaction;

#[cfg(test)]
pub(crate) mod test_utils;

pub use compute_budget::{
    COMPUTE_BUDGET_PROGRAM_ID, ComputeBudgetInstruction, ComputeBudgetSummary,
    extract_compute_budget, parse_compute_budget_instruction,
};
pub use cursor::ByteCursor;
pub use encode::{encode_message, encode_transaction};
pub use keys::{HASH_BYTES, Hash, PUBKEY_BYTES, Pubkey, SIGNATURE_BYTES, Signature};
pub use short_vec::{decode_len, encode_len};
pub use transaction::{
    AddressTableLookups, CompiledInstruction, DecodedTransaction, MESSAGE_VERSION_PREFIX, Message,
    MessageHeader, TransactionVersion, VersionedTransaction, decode_transaction, parse_header,
    parse_instruction, parse_transaction, parse_version,
};
