//! Compute Budget instruction extraction.
//!
//! The Compute Budget program controls transaction compute limits and
//! priority fees. Its instructions use a single-byte discriminator:
//!
//! - 0: Deprecated (RequestUnitsDeprecated)
//! - 1: RequestHeapFrame
//! - 2: SetComputeUnitLimit (u32 LE units)
//! - 3: SetComputeUnitPrice (u64 LE micro-lamports per unit)
//! - 4: SetLoadedAccountsDataSizeLimit
//!
//! Only the limit and the price are extracted. This pass never fails: a
//! malformed budget instruction is skipped so it cannot invalidate an
//! otherwise well-formed transaction.

use crate::decode::keys::Pubkey;
use crate::decode::transaction::Message;
use serde::Serialize;

/// `ComputeBudget111111111111111111111111111111`
pub const COMPUTE_BUDGET_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    3, 6, 70, 111, 229, 33, 23, 50, 255, 236, 173, 186, 114, 195, 155, 231, 188, 140, 229, 187,
    197, 247, 18, 107, 44, 67, 155, 58, 64, 0, 0, 0,
]);

const SET_COMPUTE_UNIT_LIMIT: u8 = 2;
const SET_COMPUTE_UNIT_PRICE: u8 = 3;

const MICRO_LAMPORTS_PER_LAMPORT: u128 = 1_000_000;

/// A recognized Compute Budget instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeBudgetInstruction {
    /// Maximum compute units.
    SetComputeUnitLimit(u32),
    /// Price in micro-lamports per compute unit.
    SetComputeUnitPrice(u64),
}

/// Compute budget settings requested by a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeBudgetSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_unit_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_unit_price_micro_lamports: Option<u64>,
}

impl ComputeBudgetSummary {
    fn apply(&mut self, instruction: ComputeBudgetInstruction) {
        match instruction {
            ComputeBudgetInstruction::SetComputeUnitLimit(units) => {
                self.compute_unit_limit = Some(units)
            }
            ComputeBudgetInstruction::SetComputeUnitPrice(price) => {
                self.compute_unit_price_micro_lamports = Some(price)
            }
        }
    }

    /// Priority fee in lamports (rounded up), when both limit and price are set.
    pub fn prioritization_fee_lamports(&self) -> Option<u64> {
        let limit = u128::from(self.compute_unit_limit?);
        let price = u128::from(self.compute_unit_price_micro_lamports?);
        let fee = (limit * price).div_ceil(MICRO_LAMPORTS_PER_LAMPORT);
        u64::try_from(fee).ok()
    }
}

/// Parse Compute Budget instruction data.
///
/// Returns `None` for empty data, unknown discriminators, and payloads too
/// short for their discriminator. Bytes past the payload are ignored.
pub fn parse_compute_budget_instruction(data: &[u8]) -> Option<ComputeBudgetInstruction> {
    let (&discriminator, payload) = data.split_first()?;
    match discriminator {
        SET_COMPUTE_UNIT_LIMIT => {
            let units = u32::from_le_bytes(payload.get(..4)?.try_into().ok()?);
            Some(ComputeBudgetInstruction::SetComputeUnitLimit(units))
        }
        SET_COMPUTE_UNIT_PRICE => {
            let price = u64::from_le_bytes(payload.get(..8)?.try_into().ok()?);
            Some(ComputeBudgetInstruction::SetComputeUnitPrice(price))
        }
        _ => None,
    }
}

/// Summarize the Compute Budget instructions of a message.
///
/// Later instructions override earlier ones field by field. Returns `None`
/// when no instruction was recognized.
pub fn extract_compute_budget(message: &Message) -> Option<ComputeBudgetSummary> {
    let mut summary = ComputeBudgetSummary::default();
    let mut found = false;

    for (ordinal, ix) in message.instructions.iter().enumerate() {
        if message.program_id(ix) != Some(&COMPUTE_BUDGET_PROGRAM_ID) {
            continue;
        }

        match parse_compute_budget_instruction(&ix.data) {
            Some(instruction) => {
                log::debug!("instruction {}: {:?}", ordinal, instruction);
                summary.apply(instruction);
                found = true;
            }
            None => log::debug!(
                "instruction {}: ignoring compute budget data {}",
                ordinal,
                hex::encode(&ix.data)
            ),
        }
    }

    found.then_some(summary)
}
