//! chainrevoke CLI: list the ERC-20 approvals an address has granted and
//! flag the suspicious ones.
//!
//! Usage:
//! ```bash
//! # Scan via Etherscan
//! chainrevoke 0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045 YourApiKeyToken
//!
//! # Key from the environment, any Etherscan-compatible explorer
//! CHAINREVOKE_ETHERSCAN_KEY=... chainrevoke 0xd8dA... --api-url https://api.polygonscan.com/api
//!
//! # Offline, from a saved tokentx response, as JSON
//! chainrevoke 0xd8dA... --input tokentx.json --json
//! ```

mod logging;
mod report;
mod scan;

use std::path::PathBuf;
use std::str::FromStr;

use alloy_primitives::Address;
use anyhow::{Context, Result};
use clap::Parser;

use chainrevoke_core::risk::UnlimitedAllowance;
use chainrevoke_core::RiskClassifier;
use chainrevoke_evm::{DecodeMode, EvmApprovalDecoder};
use chainrevoke_explorer::{
    EtherscanClient, ExplorerConfig, StaticSource, TransactionSource, DEFAULT_API_URL,
};

use crate::logging::{init_tracing, LogConfig, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "chainrevoke",
    version,
    about = "Find ERC-20 approvals of an address and flag risky ones",
    after_help = "Risk flags are heuristics: a missing token symbol or a spender starting with \
                  0x000. The spender check is weak and misses most malicious contracts."
)]
struct Cli {
    /// Address whose approvals to list
    address: String,

    /// Explorer API key
    #[arg(env = "CHAINREVOKE_ETHERSCAN_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Etherscan-compatible API endpoint
    #[arg(long, env = "CHAINREVOKE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Read transaction records from a JSON file instead of the explorer
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout: u64,

    /// ABI-decode approve arguments and skip calls that are too short
    #[arg(long)]
    strict: bool,

    /// Also flag approvals of the maximum uint256 amount
    #[arg(long)]
    flag_unlimited: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging for all chainrevoke crates
    #[arg(short, long)]
    verbose: bool,

    /// Global log level (RUST_LOG overrides)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Structured JSON logs on stderr
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn log_config(&self) -> LogConfig {
        let format = if self.log_json {
            LogFormat::Json
        } else {
            LogFormat::Text
        };
        let config = LogConfig::default()
            .with_level(self.log_level.clone())
            .with_format(format);
        if self.verbose {
            config.verbose()
        } else {
            config
        }
    }

    fn decode_mode(&self) -> DecodeMode {
        if self.strict {
            DecodeMode::Strict
        } else {
            DecodeMode::Lenient
        }
    }

    fn classifier(&self) -> RiskClassifier {
        let classifier = RiskClassifier::default();
        if self.flag_unlimited {
            classifier.with_rule(UnlimitedAllowance)
        } else {
            classifier
        }
    }

    fn source(&self) -> Result<Box<dyn TransactionSource>> {
        if let Some(path) = &self.input {
            let source = StaticSource::from_file(path)
                .with_context(|| format!("read transactions from {}", path.display()))?;
            return Ok(Box::new(source));
        }

        let key = self
            .api_key
            .clone()
            .context("API key required: pass it as the second argument or set CHAINREVOKE_ETHERSCAN_KEY")?;
        let config = ExplorerConfig::default()
            .with_base_url(self.api_url.clone())
            .with_api_key(key)
            .with_timeout(self.timeout);
        Ok(Box::new(EtherscanClient::new(config)?))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_config());

    Address::from_str(&cli.address)
        .with_context(|| format!("invalid address: {}", cli.address))?;

    let source = cli.source()?;
    let decoder = EvmApprovalDecoder::with_mode(cli.decode_mode());
    let classifier = cli.classifier();
    tracing::debug!(
        source = %source.describe(),
        mode = ?decoder.mode(),
        rules = classifier.rules().count(),
        "starting scan"
    );

    let report = scan::run_scan(source.as_ref(), &decoder, &classifier, &cli.address).await?;

    if cli.json {
        report::print_json(&report)?;
    } else {
        report::print(&report);
    }
    Ok(())
}
