//! API error types

use thiserror::Error;

/// Failure talking to the resolutions backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout or other transport failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("{status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
