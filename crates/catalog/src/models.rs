use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One entry per distinguishable runtime build.
///
/// `version` is the sole identity: the catalog holds at most one record per
/// version string, and every lookup goes through it. All other fields are
/// mutated in place across the record's lifetime — by reconciliation
/// (carrying local state forward), by install completion (setting the
/// installed fields) and by removal (clearing them). Records are never
/// deleted from the catalog; removal resets state but keeps the entry so the
/// build stays available for reinstallation.
///
/// Every field except `version` defaults when absent from persisted data, so
/// catalogs written by older builds load cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// Stable identity key, unique within the catalog
    pub version: String,
    /// Selects the install root (Wine-family vs Proton-family)
    #[serde(default)]
    pub kind: RuntimeKind,
    /// Opaque upstream content fingerprint, equality-compared only
    #[serde(default)]
    pub checksum: String,
    /// Archive location, handed to the provisioner verbatim
    #[serde(default)]
    pub download_url: String,
    /// Local install location; empty means "not installed"
    #[serde(default)]
    pub install_dir: PathBuf,
    #[serde(default)]
    pub installed: bool,
    /// On-disk size in bytes, 0 when not installed
    #[serde(default)]
    pub disk_size: u64,
    /// Locally recorded checksum no longer matches upstream for this version.
    /// Only meaningful for installed records; recomputed on every sync.
    #[serde(default)]
    pub has_update: bool,
}

impl ReleaseRecord {
    /// Create a not-yet-installed record, as it arrives from upstream.
    pub fn new(version: impl Into<String>, kind: RuntimeKind) -> Self {
        Self {
            version: version.into(),
            kind,
            checksum: String::new(),
            download_url: String::new(),
            install_dir: PathBuf::new(),
            installed: false,
            disk_size: 0,
            has_update: false,
        }
    }

    /// Whether the record points at an install location. This is the
    /// "locally installed according to the books" check; whether the
    /// directory still exists on disk is a separate question.
    pub fn has_install_dir(&self) -> bool {
        !self.install_dir.as_os_str().is_empty()
    }

    /// Clear every installed-state field, keeping upstream metadata intact.
    pub fn reset_install_state(&mut self) {
        self.installed = false;
        self.install_dir = PathBuf::new();
        self.disk_size = 0;
        self.has_update = false;
    }
}

/// Runtime category. Determines which of the two install roots a build is
/// extracted into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuntimeKind {
    #[default]
    Wine,
    Proton,
}

/// Upstream release listing. The three sources are always requested
/// together; there is no per-source configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceId {
    WineGe,
    ProtonGe,
    WineLutris,
}

/// Every supported source, in request order.
pub const ALL_SOURCES: [SourceId; 3] = [SourceId::WineGe, SourceId::ProtonGe, SourceId::WineLutris];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default() {
        // A catalog persisted before new fields were added must still load.
        let record: ReleaseRecord = serde_json::from_value(json!({"version": "Wine-GE-8-26"})).unwrap();
        assert_eq!(record.version, "Wine-GE-8-26");
        assert_eq!(record.kind, RuntimeKind::Wine);
        assert!(!record.installed);
        assert!(!record.has_install_dir());
        assert_eq!(record.disk_size, 0);
    }

    #[test]
    fn test_reset_install_state_keeps_upstream_metadata() {
        let mut record = ReleaseRecord::new("GE-Proton9-4", RuntimeKind::Proton);
        record.checksum = "abc123".to_string();
        record.download_url = "https://example.invalid/proton.tar.xz".to_string();
        record.install_dir = PathBuf::from("/tools/proton/GE-Proton9-4");
        record.installed = true;
        record.disk_size = 400_000_000;
        record.has_update = true;

        record.reset_install_state();
        assert!(!record.installed);
        assert!(!record.has_install_dir());
        assert_eq!(record.disk_size, 0);
        assert!(!record.has_update);
        // Upstream identity survives for reinstallation.
        assert_eq!(record.checksum, "abc123");
        assert_eq!(record.download_url, "https://example.invalid/proton.tar.xz");
    }

    #[test]
    fn test_roundtrip() {
        let mut record = ReleaseRecord::new("Wine-GE-8-26", RuntimeKind::Wine);
        record.install_dir = PathBuf::from("/tools/wine/Wine-GE-8-26");
        record.installed = true;
        let value = serde_json::to_value(&record).unwrap();
        let back: ReleaseRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}
