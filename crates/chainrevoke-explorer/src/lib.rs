//! chainrevoke-explorer: transaction history sources.
//!
//! - [`EtherscanClient`]: one `account/tokentx` request against any
//!   Etherscan-compatible API (base URL is configuration, not a constant)
//! - [`StaticSource`]: records from memory or a saved JSON response
//!
//! # Usage
//! ```ignore
//! let config = ExplorerConfig::default().with_api_key("YourApiKeyToken");
//! let client = EtherscanClient::new(config)?;
//! let records = client.fetch_transactions("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045").await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod memory;

pub use client::{EtherscanClient, TransactionSource};
pub use config::{ExplorerConfig, SortOrder, DEFAULT_API_URL};
pub use error::ExplorerError;
pub use memory::StaticSource;
