//! Install/removal lifecycle for compatibility-layer runtime builds.
//!
//! The catalog (see `cellar-catalog`) records what exists and what is
//! installed; this crate drives the operations that change that state. One
//! installation per version at a time is the caller's contract — the
//! [`CancelMap`] hands out exactly one tracked cancellation token per
//! version, and racing two installs of the same version orphans the first
//! token (documented, not guarded).

pub mod error;

mod cancel;
mod install;
mod progress;
mod provision;
mod remove;

pub use crate::cancel::CancelMap;
pub use crate::install::{InstallRoots, Installer, Outcome};
pub use crate::progress::{InstallState, ProgressInfo, ProgressSink, null_sink};
pub use crate::provision::{Provisioner, ProvisionedRuntime};
pub use crate::remove::Remover;
use std::sync::Arc;

pub type ProvisionerHandle = Arc<dyn Provisioner + Send + Sync>;
