//! Configuration Error Types

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Configuration sources could not be read or merged
    #[display("could not load configuration")]
    Load,
    /// Loaded configuration fails validation
    #[display("invalid configuration: {_0}")]
    Invalid(#[error(not(source))] String),
}
