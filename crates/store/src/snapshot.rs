//! Versioned snapshot of the whole store state.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rxstock_inventory::InventoryItem;
use rxstock_ordering::Order;
use rxstock_suppliers::Supplier;

/// Snapshot schema version written by this build.
///
/// Bump on any structural change; loading a snapshot with an unknown version
/// fails loudly instead of best-effort parsing.
pub const SCHEMA_VERSION: u32 = 1;

/// The entire store state as one serializable document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub schema_version: u32,
    pub inventory: Vec<InventoryItem>,
    /// Newest-first, matching the live collection.
    pub orders: Vec<Order>,
    pub suppliers: Vec<Supplier>,
}

impl StoreSnapshot {
    pub fn check_version(&self) -> Result<(), SnapshotError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(SnapshotError::UnsupportedSchemaVersion {
                found: self.schema_version,
                supported: SCHEMA_VERSION,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot (de)serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("unsupported snapshot schema version {found} (this build supports {supported})")]
    UnsupportedSchemaVersion { found: u32, supported: u32 },
}

/// Write a snapshot as pretty JSON.
pub fn write_snapshot(path: &Path, snapshot: &StoreSnapshot) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read and version-check a snapshot.
pub fn read_snapshot(path: &Path) -> Result<StoreSnapshot, SnapshotError> {
    let json = fs::read_to_string(path)?;
    let snapshot: StoreSnapshot = serde_json::from_str(&json)?;
    snapshot.check_version()?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_snapshot(schema_version: u32) -> StoreSnapshot {
        StoreSnapshot {
            schema_version,
            inventory: Vec::new(),
            orders: Vec::new(),
            suppliers: Vec::new(),
        }
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let snapshot = empty_snapshot(SCHEMA_VERSION);
        write_snapshot(&path, &snapshot).unwrap();

        let loaded = read_snapshot(&path).unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        write_snapshot(&path, &empty_snapshot(99)).unwrap();

        let err = read_snapshot(&path).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::UnsupportedSchemaVersion { found: 99, supported: SCHEMA_VERSION }
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_snapshot(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
    }
}
