//! Transaction builders shared by unit tests.
//!
//! The legacy builder produces the same transaction as
//! `tests/fixtures/legacy_transfer.b64`.

use crate::decode::compute_budget::COMPUTE_BUDGET_PROGRAM_ID;
use crate::decode::keys::{Hash, Pubkey, Signature};
use crate::decode::transaction::{
    AddressTableLookups, CompiledInstruction, Message, MessageHeader, TransactionVersion,
    VersionedTransaction,
};

/// A key whose 32 bytes all equal `byte`.
pub fn key(byte: u8) -> Pubkey {
    Pubkey::new_from_array([byte; 32])
}

pub fn compute_budget_ix(program_id_index: u8, data: &[u8]) -> CompiledInstruction {
    CompiledInstruction {
        program_id_index,
        accounts: vec![],
        data: data.to_vec(),
    }
}

/// Instruction addressed to the system program of [`legacy_transfer`].
pub fn system_ix(data: &[u8]) -> CompiledInstruction {
    CompiledInstruction {
        program_id_index: 2,
        accounts: vec![0, 1],
        data: data.to_vec(),
    }
}

/// Fee payer, recipient, system program, compute budget program; a limit, a
/// price and a 1_000_000 lamport transfer.
pub fn legacy_transfer() -> VersionedTransaction {
    let mut price = vec![3];
    price.extend_from_slice(&10_000u64.to_le_bytes());

    let mut transfer = vec![2, 0, 0, 0];
    transfer.extend_from_slice(&1_000_000u64.to_le_bytes());

    VersionedTransaction {
        version: TransactionVersion::Legacy,
        signatures: vec![Signature::new_from_array([9; 64])],
        message: Message {
            header: MessageHeader {
                num_required_signatures: 1,
                num_readonly_signed_accounts: 0,
                num_readonly_unsigned_accounts: 2,
            },
            account_keys: vec![key(1), key(2), key(0), COMPUTE_BUDGET_PROGRAM_ID],
            recent_blockhash: Hash::new_from_array([7; 32]),
            instructions: vec![
                compute_budget_ix(3, &[2, 0x40, 0x0D, 0x03, 0x00]),
                compute_budget_ix(3, &price),
                system_ix(&transfer),
            ],
            address_table_lookups: None,
        },
    }
}

/// Fee payer, a program, compute budget program, and one lookup table that
/// loads one writable and one readonly address (indexes 3 and 4).
pub fn v0_with_lookup() -> VersionedTransaction {
    let mut raw = vec![8; 32];
    raw.extend_from_slice(&[1, 0, 1, 1]);

    VersionedTransaction {
        version: TransactionVersion::V0,
        signatures: vec![Signature::new_from_array([9; 64])],
        message: Message {
            header: MessageHeader {
                num_required_signatures: 1,
                num_readonly_signed_accounts: 0,
                num_readonly_unsigned_accounts: 2,
            },
            account_keys: vec![key(1), key(5), COMPUTE_BUDGET_PROGRAM_ID],
            recent_blockhash: Hash::new_from_array([7; 32]),
            instructions: vec![
                compute_budget_ix(2, &[2, 0xe0, 0x93, 0x04, 0x00]),
                CompiledInstruction {
                    program_id_index: 1,
                    accounts: vec![0, 3, 4],
                    data: vec![1, 2, 3],
                },
            ],
            address_table_lookups: Some(AddressTableLookups {
                count: 1,
                // signatures 65, prefix 1, header 3, keys 97, blockhash 32,
                // instructions 18, lookup count 1
                span: 217..253,
                num_loaded_writable: 1,
                num_loaded_readonly: 1,
                raw,
            }),
        },
    }
}
