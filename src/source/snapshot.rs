//! Content snapshot: a frozen copy of the live collections on disk.
//!
//! ## Format
//!
//! ```json
//! {
//!   "collections": {
//!     "case_studies":   [ { "id": "…", "slug": "…", "order_index": 1, "is_active": true, … } ],
//!     "gallery_items":  [ … ],
//!     "portfolio_metadata": [ … ]
//!   }
//! }
//! ```
//!
//! Keys are backend table names and rows use exactly the live schema, so the
//! same [`Query`] runs against either backend with the same result. Missing
//! tables read as empty. `folio snapshot` writes this file from the live
//! source with [`capture`].

use super::{DataSource, SourceError};
use crate::query::{Collection, Query};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub collections: BTreeMap<String, Vec<Value>>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let content = fs::read_to_string(path).map_err(|source| SourceError::SnapshotIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), SourceError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SourceError::SnapshotIo {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rows stored for a collection (empty when the table is absent).
    pub fn rows(&self, collection: Collection) -> &[Value] {
        self.collections
            .get(collection.table())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn insert(&mut self, collection: Collection, rows: Vec<Value>) {
        self.collections.insert(collection.table().to_string(), rows);
    }
}

/// Data source that answers queries from a loaded [`Snapshot`].
pub struct SnapshotSource {
    snapshot: Snapshot,
    path: PathBuf,
}

impl SnapshotSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        Ok(Self {
            snapshot: Snapshot::load(path)?,
            path: path.to_path_buf(),
        })
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            path: PathBuf::from("<memory>"),
        }
    }
}

#[async_trait]
impl DataSource for SnapshotSource {
    async fn select(&self, query: &Query) -> Result<Vec<Value>, SourceError> {
        Ok(query.apply(self.snapshot.rows(query.collection).to_vec()))
    }

    fn describe(&self) -> String {
        format!("snapshot {}", self.path.display())
    }
}

/// Read every collection from `source` into a new snapshot.
///
/// Rows are captured in display order with no visibility filter, so the
/// snapshot answers queries exactly like the backend it was taken from.
pub async fn capture(source: &dyn DataSource) -> Result<Snapshot, SourceError> {
    let mut snapshot = Snapshot::default();
    for collection in Collection::ALL {
        let rows = source
            .select(&Query::all(collection).order_by(crate::query::ORDER_FIELD))
            .await?;
        snapshot.insert(collection, rows);
    }
    Ok(snapshot)
}
