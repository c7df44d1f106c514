//! Decode ERC-20 `approve(address,uint256)` calldata.
//!
//! EVM encodes `token.approve(spender, amount)` as:
//! `0x095ea7b3` ++ ABI-encode(address, uint256)
//!
//! This selector is `keccak256("approve(address,uint256)")[..4]`.
//!
//! Two paths are provided:
//! - [`decode_fixed_offset`] slices the spender out of the hex string at
//!   character offset 34..74 and never fails, even on truncated input
//! - [`decode_approve_calldata`] ABI-decodes the argument tuple with alloy
//!   and reports truncated or malformed arguments as errors

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, U256};
use chainrevoke_core::decoder::DecodeError;
use chainrevoke_core::types::{Approval, TransactionRecord};

/// Canonical signature of the ERC-20 approve function.
pub const APPROVE_SIGNATURE: &str = "approve(address,uint256)";

/// The 4-byte selector for `approve(address,uint256)`.
pub const APPROVE_SELECTOR: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];

/// `0x`-prefixed hex form of [`APPROVE_SELECTOR`].
pub const APPROVE_SELECTOR_HEX: &str = "0x095ea7b3";

/// Size of the ABI-encoded `(address, uint256)` argument block.
pub const APPROVE_ARGS_LEN: usize = 64;

/// Character range of the spender's low 20 bytes in the `0x`-prefixed hex input.
const SPENDER_HEX_START: usize = 34;
const SPENDER_HEX_END: usize = 74;

/// Decoded arguments of an approve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproveCall {
    pub spender: Address,
    pub amount: U256,
}

impl ApproveCall {
    /// Spender as lowercase `0x` + 40 hex characters.
    pub fn spender_hex(&self) -> String {
        format!("0x{}", hex::encode(self.spender.as_slice()))
    }

    pub fn is_unlimited(&self) -> bool {
        self.amount == U256::MAX
    }
}

/// Fixed-offset decode of a transaction record.
///
/// Returns `Some` iff `input` starts with `0x095ea7b3`. The spender is
/// `"0x" + input[34..74]`, clamped to the end of the string, so short input
/// produces a short (possibly empty) spender instead of an error.
pub fn decode_fixed_offset(record: &TransactionRecord) -> Option<Approval> {
    if !has_approve_selector(&record.input) {
        return None;
    }
    let end = record.input.len().min(SPENDER_HEX_END);
    let slice = record.input.get(SPENDER_HEX_START..end).unwrap_or("");
    Some(Approval::from_record(record, format!("0x{slice}")))
}

/// True if `input` literally starts with `0x095ea7b3`.
///
/// Both decode paths gate on this, so upper-case or unprefixed selectors are
/// never approvals.
pub fn has_approve_selector(input: &str) -> bool {
    input.starts_with(APPROVE_SELECTOR_HEX)
}

/// Try to decode raw calldata as an approve call.
///
/// Returns `Ok(None)` if the selector is not `approve`, `Ok(Some(..))` on
/// success, and an error if the selector matches but the arguments are
/// shorter than 64 bytes or do not ABI-decode.
pub fn decode_approve_calldata(calldata: &[u8]) -> Result<Option<ApproveCall>, DecodeError> {
    if calldata.len() < 4 {
        return Ok(None);
    }
    if &calldata[..4] != APPROVE_SELECTOR {
        return Ok(None);
    }
    let args = &calldata[4..];
    if args.len() < APPROVE_ARGS_LEN {
        return Err(DecodeError::Truncated {
            expected: APPROVE_ARGS_LEN,
            actual: args.len(),
        });
    }

    let ty = DynSolType::Tuple(vec![DynSolType::Address, DynSolType::Uint(256)]);
    let decoded = ty.abi_decode(args).map_err(|e| DecodeError::AbiDecodeFailed {
        reason: format!("approve arguments: {e}"),
    })?;

    match decoded {
        DynSolValue::Tuple(values) => match values.as_slice() {
            [DynSolValue::Address(spender), DynSolValue::Uint(amount, _)] => {
                Ok(Some(ApproveCall {
                    spender: *spender,
                    amount: *amount,
                }))
            }
            other => Err(DecodeError::AbiDecodeFailed {
                reason: format!("unexpected approve arguments: {other:?}"),
            }),
        },
        other => Err(DecodeError::AbiDecodeFailed {
            reason: format!("expected tuple, got {other:?}"),
        }),
    }
}

/// Typed decode of a transaction record.
///
/// Records without the approve selector (including empty input or explorer
/// placeholders like `"deprecated"`) are `Ok(None)` without being hex-decoded.
pub fn decode_typed(record: &TransactionRecord) -> Result<Option<Approval>, DecodeError> {
    if !has_approve_selector(&record.input) {
        return Ok(None);
    }
    let calldata = hex::decode(&record.input[2..]).map_err(|e| {
        DecodeError::InvalidHex {
            reason: e.to_string(),
        }
    })?;
    Ok(decode_approve_calldata(&calldata)?.map(|call| {
        Approval::from_record(record, call.spender_hex()).with_amount(call.amount.to_string())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainrevoke_core::types::{MAX_UINT256_DEC, UNKNOWN_SYMBOL};
    use proptest::prelude::*;
    use tiny_keccak::{Hasher, Keccak};

    const ROUTER: &str = "7a250d5630b4cf539739df2c5dacb4c659f2488d";

    /// `approve(0x7a25…488d, 2^256-1)`
    fn unlimited_router_input() -> String {
        format!("0x095ea7b3{:0>64}{}", ROUTER, "f".repeat(64))
    }

    fn selector(signature: &str) -> [u8; 4] {
        let mut k = Keccak::v256();
        k.update(signature.as_bytes());
        let mut out = [0u8; 32];
        k.finalize(&mut out);
        [out[0], out[1], out[2], out[3]]
    }

    fn record(input: &str, symbol: Option<&str>) -> TransactionRecord {
        TransactionRecord::new(
            input,
            "0xdac17f958d2ee523a2206206994597c13d831ec7",
            symbol.map(str::to_string),
            "0xfeed",
        )
    }

    #[test]
    fn selector_matches_signature_hash() {
        assert_eq!(selector(APPROVE_SIGNATURE), APPROVE_SELECTOR);
        assert_eq!(format!("0x{}", hex::encode(APPROVE_SELECTOR)), APPROVE_SELECTOR_HEX);
        assert_eq!(hex::encode(selector("transfer(address,uint256)")), "a9059cbb");
    }

    #[test]
    fn fixed_offset_scenario_known_symbol() {
        let input = "0x095ea7b3000000000000000000000000dead000000000000000000000000000000000000000000000000000000000000000064";
        let a = decode_fixed_offset(&record(input, Some("USDT"))).unwrap();
        assert_eq!(a.symbol, "USDT");
        assert_eq!(a.spender, "0xdead000000000000000000000000000000000000");
        assert_eq!(a.token, "0xdac17f958d2ee523a2206206994597c13d831ec7");
        assert_eq!(a.tx_hash, "0xfeed");
        assert!(a.amount.is_none());
    }

    #[test]
    fn fixed_offset_ignores_transfer() {
        let input = format!("0xa9059cbb{:0>64}{:0>64}", ROUTER, "64");
        assert!(decode_fixed_offset(&record(&input, Some("USDT"))).is_none());
        assert!(decode_fixed_offset(&record("", None)).is_none());
    }

    #[test]
    fn fixed_offset_truncated_input_yields_short_spender() {
        let a = decode_fixed_offset(&record("0x095ea7b3000000000000000000000000dead", None)).unwrap();
        assert_eq!(a.spender, "0xdead");
        assert_eq!(a.symbol, UNKNOWN_SYMBOL);

        let a = decode_fixed_offset(&record("0x095ea7b3", None)).unwrap();
        assert_eq!(a.spender, "0x");
    }

    #[test]
    fn fixed_offset_selector_is_case_sensitive() {
        assert!(decode_fixed_offset(&record(&unlimited_router_input().to_uppercase(), None)).is_none());
    }

    #[test]
    fn typed_decode_reads_spender_and_amount() {
        let call = hex::decode(&unlimited_router_input()[2..]).unwrap();
        let decoded = decode_approve_calldata(&call).unwrap().unwrap();
        assert_eq!(decoded.spender_hex(), format!("0x{ROUTER}"));
        assert!(decoded.is_unlimited());

        let a = decode_typed(&record(&unlimited_router_input(), Some("USDT"))).unwrap().unwrap();
        assert_eq!(a.spender, format!("0x{ROUTER}"));
        assert_eq!(a.amount.as_deref(), Some(MAX_UINT256_DEC));
    }

    #[test]
    fn typed_decode_rejects_truncated_arguments() {
        let input = "0x095ea7b3000000000000000000000000dead000000000000000000000000000000000000000000000000000000000000000064";
        let err = decode_typed(&record(input, Some("USDT"))).unwrap_err();
        assert_eq!(err, DecodeError::Truncated { expected: 64, actual: 47 });
    }

    #[test]
    fn typed_decode_rejects_odd_length_hex() {
        let input = format!("{}0", unlimited_router_input());
        assert!(matches!(
            decode_typed(&record(&input, None)),
            Err(DecodeError::InvalidHex { .. })
        ));
    }

    #[test]
    fn typed_decode_skips_non_approve_without_hex_decoding() {
        assert_eq!(decode_typed(&record("deprecated", None)), Ok(None));
        assert_eq!(decode_typed(&record("", None)), Ok(None));
        assert_eq!(decode_typed(&record("0x", None)), Ok(None));
        assert_eq!(decode_approve_calldata(&[0x09, 0x5e]), Ok(None));
    }

    #[test]
    fn typed_decode_requires_literal_selector() {
        let input = unlimited_router_input();
        let variants = [
            input.to_uppercase(),
            input[2..].to_string(),
            input.replacen("095ea7b3", "095EA7B3", 1),
            input.replacen("0x", "0X", 1),
        ];
        for v in &variants {
            assert_eq!(decode_typed(&record(v, None)), Ok(None), "{v}");
            assert!(decode_fixed_offset(&record(v, None)).is_none(), "{v}");
        }
        // upper-case argument hex is still valid once the selector matches
        let mixed = format!("0x095ea7b3{}", input[10..].to_uppercase());
        let a = decode_typed(&record(&mixed, None)).unwrap().unwrap();
        assert_eq!(a.spender, format!("0x{ROUTER}"));
    }

    #[test]
    fn typed_decode_ignores_trailing_bytes() {
        let input = format!("{}{}", unlimited_router_input(), "00".repeat(8));
        assert!(decode_typed(&record(&input, None)).unwrap().is_some());
    }

    proptest! {
        #[test]
        fn fixed_offset_some_iff_selector(
            input in "(0x095ea7b3|0X095EA7B3|095ea7b3|0x095EA7B3|0xa9059cbb|0x)?[0-9a-fA-F]{0,140}",
        ) {
            let decoded = decode_fixed_offset(&record(&input, None));
            prop_assert_eq!(decoded.is_some(), input.starts_with("0x095ea7b3"));
        }

        #[test]
        fn typed_never_matches_what_fixed_offset_rejects(
            input in "(0x095ea7b3|0X095EA7B3|095ea7b3|0x095EA7B3|0xa9059cbb)[0-9a-fA-F]{0,140}",
        ) {
            let r = record(&input, None);
            if decode_fixed_offset(&r).is_none() {
                prop_assert_eq!(decode_typed(&r), Ok(None));
            } else {
                prop_assert!(decode_typed(&r) != Ok(None));
            }
        }

        #[test]
        fn fixed_offset_spender_is_offset_slice(args in "[0-9a-f]{64,128}") {
            let input = format!("0x095ea7b3{args}");
            let a = decode_fixed_offset(&record(&input, Some("DAI"))).unwrap();
            prop_assert_eq!(a.spender, format!("0x{}", &input[34..74]));
        }

        #[test]
        fn missing_symbol_becomes_unknown(args in "[0-9a-f]{0,128}", empty in any::<bool>()) {
            let input = format!("0x095ea7b3{args}");
            let symbol = if empty { Some("") } else { None };
            let a = decode_fixed_offset(&record(&input, symbol)).unwrap();
            prop_assert_eq!(a.symbol, UNKNOWN_SYMBOL);
        }

        #[test]
        fn typed_and_fixed_offset_agree_on_well_formed_calldata(
            spender in "[0-9a-f]{40}",
            amount in "[0-9a-f]{64}",
        ) {
            let input = format!("0x095ea7b3{:0>64}{amount}", spender);
            let r = record(&input, Some("WETH"));
            let typed = decode_typed(&r).unwrap().unwrap();
            let fixed = decode_fixed_offset(&r).unwrap();
            prop_assert_eq!(typed.spender, fixed.spender);
        }
    }
}
