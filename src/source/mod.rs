//! Data client: the read-only query interface pages fetch content through.
//!
//! Two backends implement [`DataSource`]:
//!
//! | Backend | Reads from |
//! |---------|------------|
//! | [`RestClient`] | the hosted database's REST endpoint (`/rest/v1/{table}`) |
//! | [`SnapshotSource`] | a JSON dump of the same collections on disk |
//!
//! Both speak the live collection schema, so there is one source of truth for
//! record shapes; the snapshot is a frozen copy of it (see [`snapshot`]).
//!
//! The connection settings are resolved once at startup by [`connect`] and
//! never change afterwards. A live source with a missing URL or key never gets
//! this far: config validation rejects it first.

mod error;
mod rest;
pub mod snapshot;

pub use error::SourceError;
pub use rest::RestClient;
pub use snapshot::{Snapshot, SnapshotSource};

use crate::config::{SourceConfig, SourceKind};
use crate::query::Query;
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

/// A read-only query interface over the portfolio collections.
///
/// Implementations return raw JSON rows; callers run
/// [`Query::apply`](crate::query::Query::apply) and decode them into typed
/// records.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Run `query` and return the matching rows.
    async fn select(&self, query: &Query) -> Result<Vec<Value>, SourceError>;

    /// Human-readable description for CLI output (`"live https://…"`).
    fn describe(&self) -> String;
}

/// Build the configured data source.
///
/// Relative snapshot paths resolve against `base_dir` (the directory holding
/// `folio.toml`).
pub fn connect(config: &SourceConfig, base_dir: &Path) -> Result<Box<dyn DataSource>, SourceError> {
    match config.kind {
        SourceKind::Live => {
            let client = RestClient::new(
                &config.url,
                &config.anon_key,
                Duration::from_secs(config.timeout_secs),
            )?;
            Ok(Box::new(client))
        }
        SourceKind::Snapshot => {
            let path = base_dir.join(&config.snapshot);
            Ok(Box::new(SnapshotSource::open(&path)?))
        }
    }
}
