//! Unified error types for the chart pipeline.

use crate::shared::BucketKey;
use serde::Serialize;
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Series error: {0}")]
    Series(#[from] SeriesError),

    #[error("Compute error: {0}")]
    Compute(#[from] ComputeError),

    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors. Never escape the fetcher: they degrade to an empty series.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Malformed body: {0}")]
    MalformedBody(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl From<SeriesError> for HttpError {
    fn from(e: SeriesError) -> Self {
        HttpError::MalformedBody(e.to_string())
    }
}

/// Upstream series that cannot be used as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Series not ascending at index {index}: {timestamp_ms} after {previous_ms}")]
    Unordered {
        index: usize,
        previous_ms: i64,
        timestamp_ms: i64,
    },

    #[error("Malformed row {index}: {reason}")]
    MalformedRow { index: usize, reason: String },
}

/// Degenerate arithmetic while composing ratios or summaries.
///
/// Kept distinct from a legitimate zero so consumers can tell the two apart.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComputeError {
    #[error("Zero denominator at {time}")]
    ZeroDenominator { time: BucketKey },

    #[error("Decimal overflow at {time}")]
    Overflow { time: BucketKey },
}

/// An asset that cannot be mapped to an upstream identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("No contract address for {symbol} on {platform}")]
    NoContractAddress { symbol: String, platform: String },
}
