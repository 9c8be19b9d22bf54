//! Local filesystem store backend.
//!
//! Each entry is a single pretty-printed JSON file (`<name>.json`) inside a
//! configured root directory, accessed via `tokio::fs` for async I/O. The
//! layout is deliberately boring so users can inspect or hand-edit their
//! data with a text editor.

use crate::DataStore;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use serde_json::Value;
use std::fs::create_dir_all as sync_create_dir;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Local filesystem store.
///
/// # Examples
///
/// ```no_run
/// use cellar_store::backend::LocalStore;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = LocalStore::new("/home/user/.local/share/cellar/store")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LocalStore {
    /// Root directory holding one file per entry
    root: PathBuf,
}
impl LocalStore {
    /// Create a new local store rooted at `root`.
    ///
    /// The directory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute, or exists but is not a
    /// directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidRoot(root));
        }
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::InvalidRoot(root));
            }
        } else {
            // Use non-async here; it'll only happen once on store
            // initialization and it's not worth making the constructor async.
            sync_create_dir(&root).map_err(ErrorKind::Io)?;
        }
        Ok(Self { root })
    }

    /// Map an entry name to its file path, rejecting anything that would
    /// escape the root directory.
    fn entry_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\', '\0']) || name.starts_with('.') {
            exn::bail!(ErrorKind::InvalidName(name.to_string()));
        }
        Ok(self.root.join(format!("{name}.json")))
    }
}

#[async_trait]
impl DataStore for LocalStore {
    async fn has(&self, name: &str) -> Result<bool> {
        let path = self.entry_path(name)?;
        Ok(fs::try_exists(&path).await.map_err(ErrorKind::Io)?)
    }

    async fn get(&self, name: &str, default: Value) -> Result<Value> {
        let path = self.entry_path(name)?;
        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(default),
            Err(err) => return Err(exn::Exn::from(ErrorKind::Io(err))),
        };
        serde_json::from_slice(&data).or_raise(|| ErrorKind::Malformed(name.to_string()))
    }

    async fn set(&self, name: &str, value: Value) -> Result<()> {
        let path = self.entry_path(name)?;
        let data = serde_json::to_vec_pretty(&value).or_raise(|| ErrorKind::Malformed(name.to_string()))?;
        fs::write(&path, data).await.map_err(ErrorKind::Io)?;
        debug!(name, path = %path.display(), "entry written");
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let path = self.entry_path(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(name, "entry deleted");
                Ok(())
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(exn::Exn::from(ErrorKind::Io(err))),
        }
    }
}
