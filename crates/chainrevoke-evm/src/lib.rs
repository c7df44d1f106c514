//! chainrevoke-evm: EVM `approve(address,uint256)` decoder.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chainrevoke_core::{ApprovalDecoder, TransactionRecord};
//! use chainrevoke_evm::EvmApprovalDecoder;
//!
//! let record = TransactionRecord::new(
//!     "0x095ea7b3000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa960450000000000000000000000000000000000000000000000000000000000000064",
//!     "0xdac17f958d2ee523a2206206994597c13d831ec7",
//!     Some("USDT".into()),
//!     "0xabc",
//! );
//! let approval = EvmApprovalDecoder::strict().decode(&record).unwrap();
//! println!("{approval}");  // "USDT (0xdac1…) -> 0xd8da… amount=100"
//! ```

pub mod approve;
pub mod decoder;

pub use approve::{decode_fixed_offset, ApproveCall, APPROVE_SELECTOR, APPROVE_SELECTOR_HEX};
pub use decoder::{DecodeMode, EvmApprovalDecoder};
