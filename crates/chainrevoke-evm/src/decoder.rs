//! `EvmApprovalDecoder`: the top-level EVM approval decoder.
//!
//! Decode priority:
//! 1. No `0x095ea7b3` prefix  → not an approval
//! 2. [`DecodeMode::Lenient`] → spender sliced from hex offset 34..74 (default)
//! 3. [`DecodeMode::Strict`]  → alloy ABI decode of `(address, uint256)`

use chainrevoke_core::decoder::{ApprovalDecoder, DecodeError};
use chainrevoke_core::types::{Approval, TransactionRecord};

use crate::approve::{decode_fixed_offset, decode_typed};

/// How approve arguments are extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Fixed-offset string slicing. Never fails; truncated input yields a
    /// truncated spender.
    #[default]
    Lenient,
    /// Typed ABI decode with length validation. Malformed calls are errors.
    Strict,
}

/// EVM approve-call decoder.
#[derive(Debug, Clone, Default)]
pub struct EvmApprovalDecoder {
    mode: DecodeMode,
}

impl EvmApprovalDecoder {
    /// Create a fixed-offset decoder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: DecodeMode) -> Self {
        Self { mode }
    }

    pub fn lenient() -> Self {
        Self::with_mode(DecodeMode::Lenient)
    }

    /// Create a decoder that ABI-decodes the arguments and fills `amount`.
    pub fn strict() -> Self {
        Self::with_mode(DecodeMode::Strict)
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }
}

impl ApprovalDecoder for EvmApprovalDecoder {
    fn chain_family(&self) -> &'static str {
        "evm"
    }

    fn try_decode(&self, record: &TransactionRecord) -> Result<Option<Approval>, DecodeError> {
        let result = match self.mode {
            DecodeMode::Strict => decode_typed(record),
            DecodeMode::Lenient => Ok(decode_fixed_offset(record)),
        };

        match &result {
            Ok(Some(approval)) => tracing::debug!(
                tx = %approval.tx_hash,
                token = %approval.token,
                symbol = %approval.symbol,
                spender = %approval.spender,
                "decoded approval"
            ),
            Ok(None) => tracing::trace!(tx = %record.hash, "not an approve call"),
            Err(e) => tracing::warn!(tx = %record.hash, error = %e, "malformed approve calldata"),
        }
        result
    }
}
