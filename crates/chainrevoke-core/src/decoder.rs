//! The `ApprovalDecoder` trait: implemented by each chain-specific crate.

use crate::types::{Approval, TransactionRecord};
use thiserror::Error;

/// Errors that can occur while decoding approve calldata.
///
/// A record that is simply not an `approve` call is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid calldata hex: {reason}")]
    InvalidHex { reason: String },

    #[error("approve calldata truncated: expected {expected} argument bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("ABI decode failed: {reason}")]
    AbiDecodeFailed { reason: String },
}

/// A record the decoder recognised as `approve` but could not decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub tx_hash: String,
    pub error: DecodeError,
}

/// Output of [`ApprovalDecoder::decode_batch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeBatch {
    /// Decoded approvals, in input order.
    pub approvals: Vec<Approval>,
    /// Approve calls whose arguments could not be decoded.
    pub rejected: Vec<RejectedRecord>,
}

/// Extracts approvals from raw transaction records.
pub trait ApprovalDecoder: Send + Sync {
    /// Returns the chain family name this decoder handles (e.g. `"evm"`).
    fn chain_family(&self) -> &'static str;

    /// Decode one record.
    ///
    /// `Ok(None)` means the record is not an approve call.
    fn try_decode(&self, record: &TransactionRecord) -> Result<Option<Approval>, DecodeError>;

    /// Like [`try_decode`](Self::try_decode), treating decode failures as "no approval".
    fn decode(&self, record: &TransactionRecord) -> Option<Approval> {
        self.try_decode(record).ok().flatten()
    }

    /// Decode every record, keeping failures alongside the successes.
    fn decode_batch(&self, records: &[TransactionRecord]) -> DecodeBatch {
        let mut batch = DecodeBatch::default();
        for record in records {
            match self.try_decode(record) {
                Ok(Some(approval)) => batch.approvals.push(approval),
                Ok(None) => {}
                Err(error) => batch.rejected.push(RejectedRecord {
                    tx_hash: record.hash.clone(),
                    error,
                }),
            }
        }
        batch
    }
}
