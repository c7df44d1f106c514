//! Etherscan `account/tokentx` client backed by `reqwest`.
//!
//! Issues exactly one request per call. There is no pagination, retry or
//! backoff; an HTTP 429 surfaces as [`ExplorerError::RateLimited`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use chainrevoke_core::types::TransactionRecord;

use crate::config::ExplorerConfig;
use crate::error::ExplorerError;

/// Message Etherscan returns alongside `status: "0"` for an empty history.
const NO_TRANSACTIONS: &str = "No transactions found";

/// Anything that can produce the transaction history of an address.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Short label for logs (e.g. the base URL or a file path).
    fn describe(&self) -> String;

    async fn fetch_transactions(
        &self,
        address: &str,
    ) -> Result<Vec<TransactionRecord>, ExplorerError>;
}

// ─── Response envelope ────────────────────────────────────────────────────────

/// `{ "status": "1", "message": "OK", "result": [...] }`
#[derive(Debug, Deserialize)]
pub(crate) struct EtherscanResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: serde_json::Value,
}

impl EtherscanResponse {
    /// Unwrap the envelope into transaction records.
    pub(crate) fn into_records(self) -> Result<Vec<TransactionRecord>, ExplorerError> {
        let Self { status, message, result } = self;
        match result {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<TransactionRecord>, _>>()
                .map_err(|e| ExplorerError::InvalidResponse {
                    reason: format!("malformed transaction list: {e}"),
                }),
            _ if status == "0" && message.starts_with(NO_TRANSACTIONS) => Ok(vec![]),
            serde_json::Value::String(result) => Err(ExplorerError::Api { message, result }),
            other => Err(ExplorerError::Api {
                message,
                result: other.to_string(),
            }),
        }
    }
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Transaction source for Etherscan and Etherscan-compatible explorers.
pub struct EtherscanClient {
    client: Client,
    config: ExplorerConfig,
}

impl EtherscanClient {
    pub fn new(config: ExplorerConfig) -> Result<Self, ExplorerError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("chainrevoke/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    fn query<'a>(&'a self, address: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut query = vec![
            ("module", "account"),
            ("action", "tokentx"),
            ("address", address),
            ("sort", self.config.sort.as_str()),
        ];
        if let Some(key) = self.config.api_key.as_deref() {
            query.push(("apikey", key));
        }
        query
    }
}

#[async_trait]
impl TransactionSource for EtherscanClient {
    fn describe(&self) -> String {
        self.config.base_url.clone()
    }

    async fn fetch_transactions(
        &self,
        address: &str,
    ) -> Result<Vec<TransactionRecord>, ExplorerError> {
        tracing::info!(url = %self.config.base_url, address, "fetching token transactions");

        let resp = self
            .client
            .get(&self.config.base_url)
            .query(&self.query(address))
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ExplorerError::RateLimited {
                url: self.config.base_url.clone(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExplorerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: EtherscanResponse = resp.json().await?;
        let records = body.into_records()?;
        tracing::info!(count = records.len(), "received transactions");
        Ok(records)
    }
}
