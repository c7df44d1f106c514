//! Core types for transaction records and decoded approvals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbol used when the explorer returned no token metadata.
pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";

/// Decimal rendering of `2^256 - 1`, the conventional "unlimited" allowance.
pub const MAX_UINT256_DEC: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639935";

// ─── TransactionRecord ────────────────────────────────────────────────────────

/// A single transaction as returned by the block explorer.
///
/// Only the fields the decoder needs are kept; anything else in the
/// explorer's JSON is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Raw calldata, `0x`-prefixed hex (or empty).
    #[serde(rename = "input", alias = "inputData", default)]
    pub input: String,
    /// Token contract the transaction touched.
    #[serde(default)]
    pub contract_address: String,
    /// Token symbol, when the explorer knows it.
    #[serde(default)]
    pub token_symbol: Option<String>,
    /// Transaction hash (`0x…`).
    #[serde(default)]
    pub hash: String,
}

impl TransactionRecord {
    pub fn new(
        input: impl Into<String>,
        contract_address: impl Into<String>,
        token_symbol: Option<String>,
        hash: impl Into<String>,
    ) -> Self {
        Self {
            input: input.into(),
            contract_address: contract_address.into(),
            token_symbol,
            hash: hash.into(),
        }
    }

    /// The token symbol, or [`UNKNOWN_SYMBOL`] when absent or empty.
    pub fn symbol_or_unknown(&self) -> &str {
        match self.token_symbol.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => UNKNOWN_SYMBOL,
        }
    }
}

// ─── Approval ─────────────────────────────────────────────────────────────────

/// An ERC-20 `approve(address,uint256)` call extracted from one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    /// Token contract address.
    pub token: String,
    /// Token symbol, [`UNKNOWN_SYMBOL`] if the explorer had none.
    pub symbol: String,
    /// Address granted the allowance.
    pub spender: String,
    /// Hash of the approving transaction.
    pub tx_hash: String,
    /// Approved amount in base units (decimal). Only set by the typed decoder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

impl Approval {
    /// Build an approval for `record` with the given spender.
    pub fn from_record(record: &TransactionRecord, spender: impl Into<String>) -> Self {
        Self {
            token: record.contract_address.clone(),
            symbol: record.symbol_or_unknown().to_string(),
            spender: spender.into(),
            tx_hash: record.hash.clone(),
            amount: None,
        }
    }

    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    /// True if the explorer had no symbol for this token.
    pub fn is_unknown_token(&self) -> bool {
        self.symbol == UNKNOWN_SYMBOL
    }

    /// True if the decoded amount is `2^256 - 1`.
    pub fn is_unlimited(&self) -> bool {
        self.amount.as_deref() == Some(MAX_UINT256_DEC)
    }
}

impl fmt::Display for Approval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) -> {}", self.symbol, self.token, self.spender)?;
        if let Some(amount) = &self.amount {
            write!(f, " amount={amount}")?;
        }
        Ok(())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record(symbol: Option<&str>) -> TransactionRecord {
        TransactionRecord::new(
            "0x095ea7b3",
            "0xdac17f958d2ee523a2206206994597c13d831ec7",
            symbol.map(str::to_string),
            "0xabc",
        )
    }

    #[test]
    fn symbol_defaults_to_unknown() {
        assert_eq!(record(None).symbol_or_unknown(), UNKNOWN_SYMBOL);
        assert_eq!(record(Some("")).symbol_or_unknown(), UNKNOWN_SYMBOL);
        assert_eq!(record(Some("USDT")).symbol_or_unknown(), "USDT");
    }

    #[test]
    fn approval_from_record_copies_metadata() {
        let a = Approval::from_record(&record(Some("USDT")), "0xdead");
        assert_eq!(a.token, "0xdac17f958d2ee523a2206206994597c13d831ec7");
        assert_eq!(a.symbol, "USDT");
        assert_eq!(a.spender, "0xdead");
        assert_eq!(a.tx_hash, "0xabc");
        assert!(a.amount.is_none());
        assert!(!a.is_unknown_token());
    }

    #[test]
    fn record_deserializes_explorer_json() {
        let json = r#"{
            "blockNumber": "19000000",
            "hash": "0x1234",
            "input": "0x095ea7b3",
            "contractAddress": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            "tokenSymbol": "USDC",
            "tokenDecimal": "6"
        }"#;
        let r: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.input, "0x095ea7b3");
        assert_eq!(r.token_symbol.as_deref(), Some("USDC"));
        assert_eq!(r.hash, "0x1234");
    }

    #[test]
    fn record_accepts_input_data_alias_and_missing_fields() {
        let r: TransactionRecord =
            serde_json::from_str(r#"{ "inputData": "0x", "hash": "0x1" }"#).unwrap();
        assert_eq!(r.input, "0x");
        assert!(r.token_symbol.is_none());
        assert_eq!(r.contract_address, "");

        let r: TransactionRecord = serde_json::from_str(r#"{ "hash": "0x2" }"#).unwrap();
        assert_eq!(r.input, "");
    }

    #[test]
    fn approval_serializes_camel_case() {
        let a = Approval::from_record(&record(None), "0x00").with_amount("5");
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["txHash"], "0xabc");
        assert_eq!(json["symbol"], "UNKNOWN");
        assert_eq!(json["amount"], "5");
    }

    #[test]
    fn unlimited_amount_detection() {
        let a = Approval::from_record(&record(None), "0x00");
        assert!(!a.is_unlimited());
        assert!(a.clone().with_amount(MAX_UINT256_DEC).is_unlimited());
        assert!(!a.with_amount("1000").is_unlimited());
    }
}
