//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Upstream release listing could not be fetched
    #[display("release fetch failed: {_0}")]
    Fetch(#[error(not(source))] String),
    /// Durable store read/write failed
    #[display("store error")]
    Store,
    /// Persisted catalog could not be decoded
    #[display("invalid catalog data")]
    InvalidData,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Store)
    }
}
