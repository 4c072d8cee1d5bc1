//! Transaction wire-format parsing.
//!
//! Layout, in order:
//!
//! ```text
//! signatures        compact-len N, N x 64 bytes
//! message
//!   version prefix  optional, 0x80 | version (V0 only)
//!   header          3 bytes
//!   account keys    compact-len M, M x 32 bytes
//!   blockhash       32 bytes
//!   instructions    compact-len K, K x instruction
//!   lookups         compact-len L, L x lookup entry (V0 only)
//! ```

use crate::decode::compute_budget::{ComputeBudgetSummary, extract_compute_budget};
use crate::decode::cursor::ByteCursor;
use crate::decode::keys::{Hash, PUBKEY_BYTES, Pubkey, SIGNATURE_BYTES, Signature};
use crate::error::CodecError;
use std::ops::Range;

/// High bit of the first message byte marks a versioned message.
pub const MESSAGE_VERSION_PREFIX: u8 = 0x80;

/// Transaction format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionVersion {
    /// Original untagged format.
    Legacy,
    /// Version 0, with address lookup tables.
    V0,
}

impl TransactionVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionVersion::Legacy => "legacy",
            TransactionVersion::V0 => "v0",
        }
    }
}

/// Account counts that classify the account-key table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageHeader {
    pub num_required_signatures: u8,
    pub num_readonly_signed_accounts: u8,
    pub num_readonly_unsigned_accounts: u8,
}

impl MessageHeader {
    /// Check the counts against each other and the size of the key table.
    pub fn validate(&self, num_account_keys: usize) -> Result<(), CodecError> {
        if self.num_readonly_signed_accounts > self.num_required_signatures {
            return Err(CodecError::InvalidHeader(format!(
                "{} readonly signed account(s) but only {} required signature(s)",
                self.num_readonly_signed_accounts, self.num_required_signatures
            )));
        }

        let referenced = usize::from(self.num_required_signatures)
            + usize::from(self.num_readonly_unsigned_accounts);
        if referenced > num_account_keys {
            return Err(CodecError::InvalidHeader(format!(
                "header references {} account(s) but the message has {}",
                referenced, num_account_keys
            )));
        }

        Ok(())
    }

    /// Whether the static account at `index` must sign.
    pub fn is_signer(&self, index: usize) -> bool {
        index < usize::from(self.num_required_signatures)
    }

    /// Whether the static account at `index` may be written.
    ///
    /// Keys are ordered signed-writable, signed-readonly, unsigned-writable,
    /// unsigned-readonly.
    pub fn is_writable(&self, index: usize, num_account_keys: usize) -> bool {
        let num_signed = usize::from(self.num_required_signatures);
        if index < num_signed {
            index < num_signed.saturating_sub(usize::from(self.num_readonly_signed_accounts))
        } else {
            index
                < num_account_keys.saturating_sub(usize::from(self.num_readonly_unsigned_accounts))
        }
    }
}

/// An instruction that addresses its program and accounts by table index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

/// The address lookup section of a V0 message, skipped rather than modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressTableLookups {
    /// Number of lookup entries.
    pub count: u16,
    /// Byte range of the entries (after the length prefix) in the input.
    pub span: Range<usize>,
    /// Addresses loaded as writable, summed over all entries.
    pub num_loaded_writable: usize,
    /// Addresses loaded as readonly, summed over all entries.
    pub num_loaded_readonly: usize,
    /// Raw entry bytes, kept so the section can be written back unchanged.
    pub raw: Vec<u8>,
}

impl AddressTableLookups {
    pub fn num_loaded(&self) -> usize {
        self.num_loaded_writable + self.num_loaded_readonly
    }
}

/// The signed portion of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    pub account_keys: Vec<Pubkey>,
    pub recent_blockhash: Hash,
    pub instructions: Vec<CompiledInstruction>,
    /// Present only for V0 messages.
    pub address_table_lookups: Option<AddressTableLookups>,
}

impl Message {
    /// Program key an instruction is addressed to.
    pub fn program_id(&self, instruction: &CompiledInstruction) -> Option<&Pubkey> {
        self.account_keys
            .get(usize::from(instruction.program_id_index))
    }

    /// Number of account indexes an instruction may use.
    pub fn num_addressable_accounts(&self) -> usize {
        self.account_keys.len()
            + self
                .address_table_lookups
                .as_ref()
                .map_or(0, AddressTableLookups::num_loaded)
    }

    /// First account key; pays the transaction fee.
    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.account_keys.first()
    }
}

/// A parsed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedTransaction {
    pub version: TransactionVersion,
    pub signatures: Vec<Signature>,
    pub message: Message,
}

/// A decoded transaction together with what was derived while decoding it.
#[derive(Debug, Clone)]
pub struct DecodedTransaction {
    /// The parsed transaction.
    pub tx: VersionedTransaction,
    /// Compute budget settings, if any recognized instruction sets one.
    pub compute_budget: Option<ComputeBudgetSummary>,
    /// Bytes left over after the defined structure.
    pub trailing_bytes: usize,
}

impl DecodedTransaction {
    pub fn version(&self) -> TransactionVersion {
        self.tx.version
    }

    pub fn message(&self) -> &Message {
        &self.tx.message
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.tx.signatures
    }
}

/// Decode a transaction from its wire bytes.
pub fn decode_transaction(bytes: &[u8]) -> Result<DecodedTransaction, CodecError> {
    let mut cursor = ByteCursor::new(bytes);
    let tx = parse_transaction(&mut cursor)?;

    let trailing_bytes = cursor.remaining();
    if trailing_bytes > 0 {
        log::debug!(
            "ignoring {} trailing byte(s) after offset {}",
            trailing_bytes,
            cursor.position()
        );
    }

    let compute_budget = extract_compute_budget(&tx.message);

    Ok(DecodedTransaction {
        tx,
        compute_budget,
        trailing_bytes,
    })
}

/// Parse one transaction, leaving the cursor after its last byte.
pub fn parse_transaction(cursor: &mut ByteCursor<'_>) -> Result<VersionedTransaction, CodecError> {
    let signatures = parse_signatures(cursor)?;
    log::debug!("read {} signature(s)", signatures.len());

    let message_offset = cursor.position();
    let version = parse_version(cursor)?;
    log::debug!(
        "{} message starts at offset {}",
        version.as_str(),
        message_offset
    );

    let header = parse_header(cursor)?;

    let num_keys = cursor.read_compact_len()?;
    let account_keys = (0..num_keys)
        .map(|_| cursor.read_array().map(Pubkey::from))
        .collect::<Result<Vec<_>, _>>()?;
    header.validate(account_keys.len())?;
    if signatures.len() != usize::from(header.num_required_signatures) {
        return Err(CodecError::InvalidHeader(format!(
            "transaction carries {} signature(s) but the header requires {}",
            signatures.len(),
            header.num_required_signatures
        )));
    }

    let recent_blockhash = Hash::from(cursor.read_array()?);

    let num_instructions = cursor.read_compact_len()?;
    let instructions = (0..num_instructions)
        .map(|_| parse_instruction(cursor))
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!(
        "read {} account key(s) and {} instruction(s)",
        account_keys.len(),
        instructions.len()
    );

    let address_table_lookups = match version {
        TransactionVersion::Legacy => None,
        TransactionVersion::V0 => Some(skip_address_table_lookups(cursor)?),
    };

    let message = Message {
        header,
        account_keys,
        recent_blockhash,
        instructions,
        address_table_lookups,
    };
    validate_indexes(&message)?;

    Ok(VersionedTransaction {
        version,
        signatures,
        message,
    })
}

fn parse_signatures(cursor: &mut ByteCursor<'_>) -> Result<Vec<Signature>, CodecError> {
    let count = usize::from(cursor.read_compact_len()?);
    let needed = count * SIGNATURE_BYTES;
    if cursor.remaining() < needed {
        return Err(CodecError::MalformedSignature {
            count,
            needed,
            available: cursor.remaining(),
        });
    }

    (0..count)
        .map(|_| cursor.read_array().map(Signature::from))
        .collect()
}

/// Consume the version prefix if the next byte carries one.
pub fn parse_version(cursor: &mut ByteCursor<'_>) -> Result<TransactionVersion, CodecError> {
    let prefix = cursor.peek_u8()?;
    if prefix & MESSAGE_VERSION_PREFIX == 0 {
        return Ok(TransactionVersion::Legacy);
    }

    cursor.read_u8()?;
    match prefix & !MESSAGE_VERSION_PREFIX {
        0 => Ok(TransactionVersion::V0),
        other => Err(CodecError::UnsupportedVersion(other)),
    }
}

/// Read the three header counts. They are checked by [`MessageHeader::validate`]
/// once the key table is known.
pub fn parse_header(cursor: &mut ByteCursor<'_>) -> Result<MessageHeader, CodecError> {
    let [required, readonly_signed, readonly_unsigned] = cursor.read_array::<3>()?;
    Ok(MessageHeader {
        num_required_signatures: required,
        num_readonly_signed_accounts: readonly_signed,
        num_readonly_unsigned_accounts: readonly_unsigned,
    })
}

pub fn parse_instruction(cursor: &mut ByteCursor<'_>) -> Result<CompiledInstruction, CodecError> {
    let program_id_index = cursor.read_u8()?;
    let accounts = cursor.read_compact_bytes()?.to_vec();
    let data = cursor.read_compact_bytes()?.to_vec();
    log::trace!(
        "instruction: program {} with {} account(s), {} data byte(s)",
        program_id_index,
        accounts.len(),
        data.len()
    );
    Ok(CompiledInstruction {
        program_id_index,
        accounts,
        data,
    })
}

/// Walk the lookup entries without resolving them.
fn skip_address_table_lookups(
    cursor: &mut ByteCursor<'_>,
) -> Result<AddressTableLookups, CodecError> {
    let count = cursor.read_compact_len()?;
    let start = cursor.position();
    let section = cursor.rest();

    let mut num_loaded_writable = 0;
    let mut num_loaded_readonly = 0;
    for _ in 0..count {
        cursor.read_bytes(PUBKEY_BYTES)?;
        num_loaded_writable += cursor.read_compact_bytes()?.len();
        num_loaded_readonly += cursor.read_compact_bytes()?.len();
    }

    let end = cursor.position();
    log::debug!(
        "skipped {} address lookup table(s) spanning {} byte(s)",
        count,
        end - start
    );

    Ok(AddressTableLookups {
        count,
        span: start..end,
        num_loaded_writable,
        num_loaded_readonly,
        raw: section[..end - start].to_vec(),
    })
}

fn validate_indexes(message: &Message) -> Result<(), CodecError> {
    let num_static = message.account_keys.len();
    let num_addressable = message.num_addressable_accounts();

    for (ordinal, ix) in message.instructions.iter().enumerate() {
        if usize::from(ix.program_id_index) >= num_static {
            return Err(CodecError::IndexOutOfRange {
                instruction: ordinal,
                kind: "program id",
                index: ix.program_id_index,
                bound: num_static,
            });
        }
        if let Some(&index) = ix
            .accounts
            .iter()
            .find(|&&index| usize::from(index) >= num_addressable)
        {
            return Err(CodecError::IndexOutOfRange {
                instruction: ordinal,
                kind: "account",
                index,
                bound: num_addressable,
            });
        }
    }

    Ok(())
}
