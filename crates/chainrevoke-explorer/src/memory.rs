//! In-memory and file-backed transaction sources.
//!
//! Accepts either a bare JSON array of records or a full explorer envelope
//! (`{ "status", "message", "result" }`), so a saved Etherscan response can be
//! replayed offline.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

use chainrevoke_core::types::TransactionRecord;

use crate::client::{EtherscanResponse, TransactionSource};
use crate::error::ExplorerError;

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Records(Vec<TransactionRecord>),
    Envelope(EtherscanResponse),
}

/// A fixed list of records, returned for any address.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    label: String,
    records: Vec<TransactionRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self {
            label: "memory".into(),
            records,
        }
    }

    /// Parse a JSON array of records or an explorer envelope.
    pub fn from_json(json: &str) -> Result<Self, ExplorerError> {
        let payload: Payload =
            serde_json::from_str(json).map_err(|e| ExplorerError::InvalidResponse {
                reason: format!("not a transaction list or explorer response: {e}"),
            })?;
        let records = match payload {
            Payload::Records(records) => records,
            Payload::Envelope(envelope) => envelope.into_records()?,
        };
        Ok(Self::new(records))
    }

    /// Load records from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ExplorerError> {
        let content = std::fs::read_to_string(path)?;
        let mut source = Self::from_json(&content)?;
        source.label = path.display().to_string();
        tracing::debug!(path = %source.label, count = source.records.len(), "loaded records from file");
        Ok(source)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl TransactionSource for StaticSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    async fn fetch_transactions(
        &self,
        _address: &str,
    ) -> Result<Vec<TransactionRecord>, ExplorerError> {
        Ok(self.records.clone())
    }
}
