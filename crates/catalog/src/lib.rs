//! Release catalog for compatibility-layer runtimes.
//!
//! This crate owns the persisted catalog of known Wine/Proton builds and the
//! reconciliation logic that merges a freshly fetched upstream listing with
//! previously recorded local installation state. The store is not the source
//! of truth for *what exists upstream* — the release source is — but it is
//! the only record of *what is installed locally*, so reconciliation must
//! never drop an installed record just because upstream stopped listing it.

pub mod error;
mod models;
mod reconcile;
mod source;

pub use crate::models::{ALL_SOURCES, ReleaseRecord, RuntimeKind, SourceId};
pub use crate::reconcile::{CATALOG_ENTRY, Catalog};
pub use crate::source::ReleaseSource;
