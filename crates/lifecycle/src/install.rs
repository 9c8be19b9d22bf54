//! Installation driver.
//!
//! Drives a single version's install against the external [`Provisioner`],
//! per-version state machine `Idle → Installing → {Done, Aborted, Error}`.
//! The terminal state is surfaced as an [`Outcome`] value rather than an
//! error: abort is a normal conclusion, and the UI wants to render all three
//! endings the same way.

use crate::ProvisionerHandle;
use crate::cancel::CancelMap;
use crate::error::{ErrorKind, Result};
use crate::progress::ProgressSink;
use crate::provision::ProvisionedRuntime;
use cellar_catalog::{Catalog, ReleaseRecord, RuntimeKind};
use cellar_config::Config;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{error, instrument, warn};

/// Terminal state of an installation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Runtime installed and catalog updated
    Done,
    /// Cancellation was requested and the provisioner gave up; the catalog
    /// is untouched
    Aborted,
    /// Anything else went wrong; the catalog is untouched
    Failed,
}

/// The two fixed category roots runtime builds are extracted into.
#[derive(Debug, Clone)]
pub struct InstallRoots {
    pub wine: PathBuf,
    pub proton: PathBuf,
}

impl InstallRoots {
    pub fn new(wine: impl Into<PathBuf>, proton: impl Into<PathBuf>) -> Self {
        Self { wine: wine.into(), proton: proton.into() }
    }

    /// The root a build of the given kind installs under.
    pub fn root_for(&self, kind: RuntimeKind) -> &Path {
        match kind {
            RuntimeKind::Wine => &self.wine,
            RuntimeKind::Proton => &self.proton,
        }
    }

    /// Create both roots recursively. Idempotent: existing directories are
    /// not an error.
    async fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.wine).await.map_err(ErrorKind::Io)?;
        fs::create_dir_all(&self.proton).await.map_err(ErrorKind::Io)?;
        Ok(())
    }
}

impl From<&Config> for InstallRoots {
    fn from(config: &Config) -> Self {
        Self::new(&config.wine_root, &config.proton_root)
    }
}

/// Drives installations and owns their cancellation bookkeeping.
pub struct Installer {
    catalog: Arc<Catalog>,
    provisioner: ProvisionerHandle,
    cancellations: Arc<CancelMap>,
    roots: InstallRoots,
}

impl Installer {
    pub fn new(
        catalog: Arc<Catalog>,
        provisioner: ProvisionerHandle,
        cancellations: Arc<CancelMap>,
        roots: InstallRoots,
    ) -> Self {
        Self { catalog, provisioner, cancellations, roots }
    }

    /// Install `record`, reporting progress to `on_progress`.
    ///
    /// Progress passes through to the sink unmodified. A fresh cancellation
    /// token is registered under the record's version before the provisioner
    /// starts and is always released when the operation concludes, whatever
    /// the outcome. On success the matching catalog record is overwritten
    /// and persisted; a version the catalog doesn't know is a caller logic
    /// error and yields [`Outcome::Failed`]. Abort and failure leave the
    /// catalog exactly as it was.
    ///
    /// Concurrent installs of *different* versions are fine. Two concurrent
    /// installs of the *same* version are not guarded against; the second
    /// [`CancelMap::issue`] would orphan the first token.
    #[instrument(skip_all, fields(version = %record.version))]
    pub async fn install(&self, record: &ReleaseRecord, on_progress: ProgressSink) -> Outcome {
        if let Err(err) = self.roots.ensure().await {
            error!(error = %err, "could not create install roots");
            return Outcome::Failed;
        }
        let target_root = self.roots.root_for(record.kind);

        let token = self.cancellations.issue(&record.version).await;
        let result = self.provisioner.install_runtime(record, target_root, on_progress, token.clone()).await;

        let outcome = match result {
            Ok(provisioned) => self.bookkeep(record, provisioned).await,
            Err(err) if token.is_cancelled() => {
                warn!(error = %err, "installation aborted");
                Outcome::Aborted
            },
            Err(err) => {
                error!(error = %err, "installation failed");
                Outcome::Failed
            },
        };

        // Unconditional: the token must not outlive the operation.
        self.cancellations.release(&record.version).await;
        outcome
    }

    /// Request cancellation of an in-flight install of `version`.
    ///
    /// Cooperative: the provisioner decides when to actually stop. Returns
    /// whether an operation was tracked under that version.
    pub async fn cancel(&self, version: &str) -> bool {
        self.cancellations.trigger(version).await
    }

    /// Persist a successful install: merge the provisioner's metadata with
    /// the installed-state fields and overwrite the matching catalog record.
    async fn bookkeep(&self, original: &ReleaseRecord, provisioned: ProvisionedRuntime) -> Outcome {
        let mut updated = provisioned.record;
        updated.kind = original.kind;
        updated.install_dir = provisioned.install_dir;
        updated.installed = true;
        updated.has_update = false;

        match self.catalog.commit(&updated).await {
            Ok(true) => Outcome::Done,
            Ok(false) => {
                error!("version missing from catalog at install completion");
                Outcome::Failed
            },
            Err(err) => {
                error!(error = %err, "could not persist catalog");
                Outcome::Failed
            },
        }
    }
}
