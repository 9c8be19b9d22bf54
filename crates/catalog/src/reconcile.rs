//! Catalog persistence and upstream reconciliation.
//!
//! The catalog is stored as one named entry holding the full list of
//! [`ReleaseRecord`]s. Every mutation is a read-modify-write of the whole
//! value (delete-then-set, not an incremental patch), serialized through an
//! internal mutex so that concurrent installs of different versions can't
//! clobber each other's bookkeeping within this process.

use crate::error::{ErrorKind, Result};
use crate::models::{ALL_SOURCES, ReleaseRecord};
use crate::source::ReleaseSource;
use cellar_store::StoreHandle;
use exn::ResultExt;
use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Name of the durable store entry holding the full catalog.
pub const CATALOG_ENTRY: &str = "runtime-releases";

/// The persisted mapping of known runtime releases.
///
/// Owns the store entry exclusively; the installer and remover go through
/// [`commit`](Self::commit) and [`reset`](Self::reset) rather than touching
/// the store directly.
pub struct Catalog {
    store: StoreHandle,
    /// Serializes read-modify-write cycles. Readers don't take it.
    update_lock: Mutex<()>,
}

impl Catalog {
    pub fn new(store: StoreHandle) -> Self {
        Self { store, update_lock: Mutex::new(()) }
    }

    /// Return the persisted catalog verbatim, empty if none was ever stored.
    pub async fn load(&self) -> Result<Vec<ReleaseRecord>> {
        let value = self.store.get(CATALOG_ENTRY, Value::Array(vec![])).await.or_raise(|| ErrorKind::Store)?;
        serde_json::from_value(value).or_raise(|| ErrorKind::InvalidData)
    }

    /// Refresh the catalog against upstream.
    ///
    /// With `fetch_upstream` false this is a plain read of the persisted
    /// catalog — no network, no mutation. With it true, the source is asked
    /// for up to `limit` releases across all supported sources, and the
    /// result is merged with persisted local state:
    ///
    /// - a previously installed record whose directory still exists carries
    ///   its `install_dir`/`installed`/`disk_size` onto the same-version
    ///   fresh record, with `has_update` recomputed from the checksums;
    /// - an installed record missing from the fresh listing is appended
    ///   unchanged, so local installs are never silently lost;
    /// - an installed record whose directory is gone from disk is dropped
    ///   from the carry-forward (it wasn't actually installed any more).
    ///
    /// Fresh-fetch order is preserved; orphaned records follow in their
    /// stored order. The merged catalog replaces the stored value in full.
    /// A fetch failure propagates and leaves the stored catalog untouched.
    #[instrument(skip_all, fields(fetch = fetch_upstream, limit = limit))]
    pub async fn sync(
        &self,
        source: &dyn ReleaseSource,
        fetch_upstream: bool,
        limit: usize,
    ) -> Result<Vec<ReleaseRecord>> {
        if !fetch_upstream {
            return self.load().await;
        }

        let mut fresh = source.fetch_releases(&ALL_SOURCES, limit).await?;

        let _guard = self.update_lock.lock().await;
        let previous = self.load().await?;
        let mut orphans = Vec::new();
        for old in previous {
            if !old.has_install_dir() {
                continue;
            }
            if !fs::try_exists(&old.install_dir).await.unwrap_or(false) {
                debug!(version = %old.version, dir = %old.install_dir.display(),
                    "install directory gone from disk, dropping local state");
                continue;
            }
            match fresh.iter_mut().find(|new| new.version == old.version) {
                Some(new) => {
                    new.install_dir = old.install_dir.clone();
                    new.installed = old.installed;
                    new.disk_size = old.disk_size;
                    new.has_update = new.checksum != old.checksum;
                },
                // Upstream stopped listing it, but it's installed here.
                None => orphans.push(old),
            }
        }
        fresh.extend(orphans);

        self.write(&fresh).await?;
        debug!(records = fresh.len(), "catalog synced");
        Ok(fresh)
    }

    /// Overwrite the stored record matching `record.version` in full.
    ///
    /// Returns `false` (with no mutation) when the version is not present —
    /// install completion for a version the catalog has never seen is a
    /// caller logic error, not something to paper over by inserting.
    pub async fn commit(&self, record: &ReleaseRecord) -> Result<bool> {
        let _guard = self.update_lock.lock().await;
        let mut records = self.load().await?;
        let Some(slot) = records.iter_mut().find(|r| r.version == record.version) else {
            return Ok(false);
        };
        *slot = record.clone();
        self.write(&records).await?;
        Ok(true)
    }

    /// Reset the installed-state fields of the stored record for `version`.
    ///
    /// Returns `false` (with no mutation) when the version is not present.
    /// Resetting an already-reset record succeeds; the entry itself is kept
    /// for future reinstallation.
    pub async fn reset(&self, version: &str) -> Result<bool> {
        let _guard = self.update_lock.lock().await;
        let mut records = self.load().await?;
        let Some(record) = records.iter_mut().find(|r| r.version == version) else {
            return Ok(false);
        };
        record.reset_install_state();
        self.write(&records).await?;
        Ok(true)
    }

    /// Replace the stored catalog in full. Callers must hold `update_lock`.
    async fn write(&self, records: &[ReleaseRecord]) -> Result<()> {
        let value = serde_json::to_value(records).or_raise(|| ErrorKind::InvalidData)?;
        self.store.delete(CATALOG_ENTRY).await.or_raise(|| ErrorKind::Store)?;
        self.store.set(CATALOG_ENTRY, value).await.or_raise(|| ErrorKind::Store)?;
        Ok(())
    }
}
