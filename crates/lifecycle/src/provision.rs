//! Download/extract capability trait.

use crate::error::Result;
use crate::progress::ProgressSink;
use async_trait::async_trait;
use cellar_catalog::ReleaseRecord;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

/// What a successful provisioning run hands back.
#[derive(Debug, Clone)]
pub struct ProvisionedRuntime {
    /// Upstream metadata as observed during download (checksum, size and
    /// friends may be fresher than what the caller started with)
    pub record: ReleaseRecord,
    /// Directory the archive was extracted into
    pub install_dir: PathBuf,
}

/// The external download-and-extract capability.
///
/// Implementations fetch the archive named by `record.download_url`, verify
/// and unpack it under `target_root`, reporting progress through
/// `on_progress` as they go. Observing `cancel` is the implementation's
/// responsibility — this crate never forcibly terminates a run, it only
/// classifies the resulting failure by the token's state afterwards.
#[async_trait]
pub trait Provisioner: Send + Sync {
    async fn install_runtime(
        &self,
        record: &ReleaseRecord,
        target_root: &Path,
        on_progress: ProgressSink,
        cancel: CancellationToken,
    ) -> Result<ProvisionedRuntime>;
}
