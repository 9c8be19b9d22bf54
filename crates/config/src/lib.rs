//! Configuration loading and validation for cellar.
//!
//! Values are layered: built-in defaults derived from the platform's data
//! directory, then an optional `cellar.toml`, then `CELLAR_*` environment
//! variables. Later layers win.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default number of releases requested from upstream per sync.
pub const DEFAULT_FETCH_LIMIT: usize = 50;

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Install root for Wine-family builds
    pub wine_root: PathBuf,
    /// Install root for Proton-family builds
    pub proton_root: PathBuf,
    /// Directory backing the durable store
    pub store_dir: PathBuf,
    /// Upper bound on releases requested per upstream sync
    pub fetch_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        // Fall back to the current directory when the platform gives us no
        // home (containers, odd CI environments).
        let data = ProjectDirs::from("", "", "cellar")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            wine_root: data.join("tools/wine"),
            proton_root: data.join("tools/proton"),
            store_dir: data.join("store"),
            fetch_limit: DEFAULT_FETCH_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional TOML file, and the
    /// environment. When `file` is `None`, `cellar.toml` in the working
    /// directory is used if present.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let toml = match file {
            Some(path) => Toml::file_exact(path),
            None => Toml::file("cellar.toml"),
        };
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(toml)
            .merge(Env::prefixed("CELLAR_"))
            .extract()
            .or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.fetch_limit == 0 {
            exn::bail!(ErrorKind::Invalid("fetch_limit must be at least 1".to_string()));
        }
        if self.wine_root == self.proton_root {
            exn::bail!(ErrorKind::Invalid("wine_root and proton_root must differ".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.fetch_limit, DEFAULT_FETCH_LIMIT);
        assert_ne!(config.wine_root, config.proton_root);
    }

    #[test]
    fn test_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "cellar.toml",
                r#"
                    wine_root = "/opt/runtimes/wine"
                    fetch_limit = 10
                "#,
            )?;
            let config = Config::load(None).expect("config should load");
            assert_eq!(config.wine_root, PathBuf::from("/opt/runtimes/wine"));
            assert_eq!(config.fetch_limit, 10);
            // Untouched keys keep their defaults.
            assert_eq!(config.proton_root, Config::default().proton_root);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("cellar.toml", r#"fetch_limit = 10"#)?;
            jail.set_env("CELLAR_FETCH_LIMIT", "25");
            let config = Config::load(None).expect("config should load");
            assert_eq!(config.fetch_limit, 25);
            Ok(())
        });
    }

    #[test]
    fn test_zero_fetch_limit_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CELLAR_FETCH_LIMIT", "0");
            let err = Config::load(None).expect_err("zero limit must fail validation");
            assert!(matches!(&*err, ErrorKind::Invalid(_)));
            Ok(())
        });
    }

    #[test]
    fn test_identical_roots_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CELLAR_WINE_ROOT", "/tools/same");
            jail.set_env("CELLAR_PROTON_ROOT", "/tools/same");
            let err = Config::load(None).expect_err("identical roots must fail validation");
            assert!(matches!(&*err, ErrorKind::Invalid(_)));
            Ok(())
        });
    }
}
