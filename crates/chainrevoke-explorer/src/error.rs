//! Errors from the transaction source.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("explorer returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("rate limited by {url}")]
    RateLimited { url: String },

    #[error("explorer API error: {message}: {result}")]
    Api { message: String, result: String },

    #[error("invalid explorer response: {reason}")]
    InvalidResponse { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
