//! Source → decoder → classifier pipeline.

use anyhow::{Context, Result};
use serde::Serialize;

use chainrevoke_core::{Approval, ApprovalDecoder, RiskClassifier, RiskFinding};
use chainrevoke_explorer::TransactionSource;

/// An approve call that was skipped because its arguments did not decode.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedCall {
    pub tx_hash: String,
    pub error: String,
}

/// Everything the reporter needs for one address.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub address: String,
    pub source: String,
    pub transactions: usize,
    pub approvals: Vec<Approval>,
    pub risky: Vec<RiskFinding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedCall>,
}

impl ScanReport {
    /// True when the address has no approvals at all.
    pub fn is_empty(&self) -> bool {
        self.approvals.is_empty()
    }
}

/// Fetch the history of `address`, extract approvals and flag risky ones.
pub async fn run_scan(
    source: &dyn TransactionSource,
    decoder: &dyn ApprovalDecoder,
    classifier: &RiskClassifier,
    address: &str,
) -> Result<ScanReport> {
    let records = source
        .fetch_transactions(address)
        .await
        .with_context(|| format!("fetch transactions for {address} from {}", source.describe()))?;

    let batch = decoder.decode_batch(&records);
    for rejected in &batch.rejected {
        tracing::warn!(tx = %rejected.tx_hash, error = %rejected.error, "skipping approve call");
    }

    let risky = classifier.findings(&batch.approvals);
    tracing::info!(
        transactions = records.len(),
        approvals = batch.approvals.len(),
        risky = risky.len(),
        skipped = batch.rejected.len(),
        "scan complete"
    );

    Ok(ScanReport {
        address: address.to_string(),
        source: source.describe(),
        transactions: records.len(),
        approvals: batch.approvals,
        risky,
        skipped: batch
            .rejected
            .into_iter()
            .map(|r| SkippedCall {
                tx_hash: r.tx_hash,
                error: r.error.to_string(),
            })
            .collect(),
    })
}
