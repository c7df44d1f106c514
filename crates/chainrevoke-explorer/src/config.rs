//! Explorer client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Etherscan mainnet API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.etherscan.io/api";

/// Sort order requested from the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Configuration for an Etherscan-compatible explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// API base URL, e.g. "https://api.etherscan.io/api".
    ///
    /// Any Etherscan fork works here (Polygonscan, Arbiscan, a testnet
    /// endpoint, or a local mock).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Explorer API key
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub sort: SortOrder,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.into()
}

fn default_timeout_secs() -> u64 { 30 }

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            sort: SortOrder::default(),
        }
    }
}

impl ExplorerConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
