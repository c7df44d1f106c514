//! chainrevoke-core: foundation types and traits for the ChainRevoke scanner.
//!
//! This crate defines:
//! - [`TransactionRecord`]: a raw transaction as returned by a block explorer
//! - [`Approval`]: an ERC-20 `approve` call extracted from a record
//! - [`ApprovalDecoder`]: the decoder trait every chain implements
//! - [`RiskClassifier`] / [`RiskRule`]: pluggable heuristics for risky approvals

pub mod decoder;
pub mod risk;
pub mod types;

pub use decoder::{ApprovalDecoder, DecodeBatch, DecodeError, RejectedRecord};
pub use risk::{classify_risk, RiskClassifier, RiskFinding, RiskRule};
pub use types::{Approval, TransactionRecord, UNKNOWN_SYMBOL};
