//! Upstream release source trait.

use crate::error::Result;
use crate::models::{ReleaseRecord, SourceId};
use async_trait::async_trait;

/// Upstream listing of available runtime builds.
///
/// Implementations talk to the actual release hosting (GitHub release APIs
/// and friends); this crate only consumes the resulting records. A fetch is
/// all-or-nothing: a failure must not return a partial listing.
///
/// Fetched records arrive with `installed`/`install_dir`/`disk_size` unset —
/// local state is the catalog's business, not the source's.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetch up to `limit` releases across the given sources, preserving
    /// upstream listing order.
    async fn fetch_releases(&self, sources: &[SourceId], limit: usize) -> Result<Vec<ReleaseRecord>>;
}
