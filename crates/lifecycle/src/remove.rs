//! Removal driver.

use cellar_catalog::{Catalog, ReleaseRecord};
use std::sync::Arc;
use tokio::fs;
use tracing::{error, instrument, warn};

/// Deletes a version's local install and resets its catalog state.
pub struct Remover {
    catalog: Arc<Catalog>,
}

impl Remover {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Remove `record`'s local installation.
    ///
    /// Directory deletion is best-effort: a failure is logged and the
    /// bookkeeping update proceeds regardless, so a half-deleted directory
    /// doesn't leave the catalog claiming the runtime is still installed.
    /// Returns `false` only when the version is not in the catalog at all
    /// (a caller logic error) or the catalog could not be persisted. The
    /// entry itself always survives removal, ready for reinstallation.
    #[instrument(skip_all, fields(version = %record.version))]
    pub async fn remove(&self, record: &ReleaseRecord) -> bool {
        if record.has_install_dir() && fs::try_exists(&record.install_dir).await.unwrap_or(false) {
            if let Err(err) = fs::remove_dir_all(&record.install_dir).await {
                warn!(dir = %record.install_dir.display(), error = %err,
                    "could not delete install directory, updating records anyway");
            }
        }

        match self.catalog.reset(&record.version).await {
            Ok(true) => true,
            Ok(false) => {
                error!("version missing from catalog at removal");
                false
            },
            Err(err) => {
                error!(error = %err, "could not persist catalog");
                false
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellar_catalog::{CATALOG_ENTRY, RuntimeKind};
    use cellar_store::StoreHandle;
    use cellar_store::backend::MockStore;
    use std::path::Path;

    fn release(version: &str) -> ReleaseRecord {
        ReleaseRecord::new(version, RuntimeKind::Wine)
    }

    fn installed(version: &str, dir: &Path) -> ReleaseRecord {
        let mut record = release(version);
        record.install_dir = dir.to_path_buf();
        record.installed = true;
        record.disk_size = 4321;
        record
    }

    fn remover_with(records: &[ReleaseRecord]) -> (Arc<MockStore>, Remover) {
        let store = Arc::new(MockStore::with_entries([(
            CATALOG_ENTRY,
            serde_json::to_value(records).unwrap(),
        )]));
        let catalog = Arc::new(Catalog::new(Arc::clone(&store) as StoreHandle));
        (store, Remover::new(catalog))
    }

    async fn stored_catalog(store: &MockStore) -> Vec<ReleaseRecord> {
        serde_json::from_value(store.snapshot(CATALOG_ENTRY).await.unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_remove_deletes_directory_and_resets_record() {
        let tools = tempfile::tempdir().unwrap();
        let install_dir = tools.path().join("Wine-GE-8-26");
        std::fs::create_dir(&install_dir).unwrap();
        std::fs::write(install_dir.join("wine64"), b"ELF").unwrap();

        let record = installed("Wine-GE-8-26", &install_dir);
        let (store, remover) = remover_with(std::slice::from_ref(&record));

        assert!(remover.remove(&record).await);
        assert!(!install_dir.exists());
        let stored = stored_catalog(&store).await;
        assert_eq!(stored.len(), 1, "entry must survive removal");
        assert!(!stored[0].installed);
        assert!(!stored[0].has_install_dir());
        assert_eq!(stored[0].disk_size, 0);
    }

    #[tokio::test]
    async fn test_remove_not_installed_is_still_success() {
        // No folder, empty install_dir: the reset writes already-reset values.
        let record = release("Wine-GE-8-26");
        let (store, remover) = remover_with(std::slice::from_ref(&record));
        assert!(remover.remove(&record).await);
        assert_eq!(stored_catalog(&store).await.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_unknown_version_returns_false() {
        let (store, remover) = remover_with(&[release("Wine-GE-8-25")]);
        let stranger = release("Wine-GE-9-1");
        assert!(!remover.remove(&stranger).await);
        assert_eq!(stored_catalog(&store).await.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_tolerates_missing_directory() {
        let tools = tempfile::tempdir().unwrap();
        let gone = tools.path().join("already-deleted");
        let record = installed("Wine-GE-8-26", &gone);
        let (store, remover) = remover_with(std::slice::from_ref(&record));
        assert!(remover.remove(&record).await);
        assert!(!stored_catalog(&store).await[0].installed);
    }

    #[tokio::test]
    async fn test_remove_only_touches_matching_record() {
        let tools = tempfile::tempdir().unwrap();
        let dir = tools.path().join("Wine-GE-8-26");
        std::fs::create_dir(&dir).unwrap();
        let target = installed("Wine-GE-8-26", &dir);
        let other = installed("Wine-GE-8-25", tools.path());
        let (store, remover) = remover_with(&[other.clone(), target.clone()]);

        assert!(remover.remove(&target).await);
        let stored = stored_catalog(&store).await;
        assert_eq!(stored[0], other);
        assert!(!stored[1].installed);
    }
}
