//! Lifecycle Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Note that [`Installer::install`](crate::Installer::install) and
//! [`Remover::remove`](crate::Remover::remove) deliberately do *not* return
//! these errors to callers — they return discrete outcome values so the UI
//! can present state without exception handling. These kinds exist for the
//! provisioner boundary and internal propagation.

use derive_more::{Display, Error};
use std::io::Error as IoError;

/// A lifecycle error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for lifecycle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The download/extract capability failed
    #[display("provisioning failed: {_0}")]
    Provision(#[error(not(source))] String),
    /// Underlying I/O error
    #[display("I/O error: {_0}")]
    Io(IoError),
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}
