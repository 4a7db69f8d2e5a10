//! File-backed route table.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::store::route::Route;

/// Error type for route table storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed route table {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StoreError {
    /// True when the table file simply does not exist yet.
    pub fn is_missing(&self) -> bool {
        matches!(self, StoreError::Read { source, .. } if source.kind() == ErrorKind::NotFound)
    }
}

/// On-disk shape: an object with a single `routes` sequence.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RouteTable {
    #[serde(default)]
    routes: Vec<Route>,
}

/// Sole owner of the on-disk route table.
///
/// Holds only the file location; every read goes back to disk.
#[derive(Debug, Clone)]
pub struct RouteStore {
    path: PathBuf,
}

impl RouteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current table, failing open.
    ///
    /// Any read or parse failure yields an empty table. Callers that must
    /// distinguish "empty" from "unreadable" use [`RouteStore::try_load`].
    pub fn load(&self) -> Vec<Route> {
        self.fail_open(self.try_load())
    }

    fn fail_open(&self, loaded: Result<Vec<Route>, StoreError>) -> Vec<Route> {
        match loaded {
            Ok(routes) => routes,
            Err(e) if e.is_missing() => {
                tracing::debug!(path = %self.path.display(), "Route table not found, using empty table");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Route table unreadable, using empty table");
                Vec::new()
            }
        }
    }

    /// Read the current table, reporting failures.
    pub fn try_load(&self) -> Result<Vec<Route>, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|source| self.read_err(source))?;
        self.parse(&content)
    }

    /// Async counterpart of [`RouteStore::load`] for request handlers.
    pub async fn load_async(&self) -> Vec<Route> {
        self.fail_open(self.try_load_async().await)
    }

    pub async fn try_load_async(&self) -> Result<Vec<Route>, StoreError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| self.read_err(source))?;
        self.parse(&content)
    }

    fn read_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn parse(&self, content: &str) -> Result<Vec<Route>, StoreError> {
        let table: RouteTable =
            serde_json::from_str(content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(table.routes)
    }

    /// Replace the stored table with `routes`.
    ///
    /// The new content is written to a sibling temp file and renamed over the
    /// table, so readers see either the old or the new table, never a prefix.
    pub fn save(&self, routes: &[Route]) -> Result<(), StoreError> {
        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let table = RouteTable {
            routes: routes.to_vec(),
        };
        let mut body = serde_json::to_vec_pretty(&table).map_err(|e| write_err(e.into()))?;
        body.push(b'\n');

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&body).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::debug!(path = %self.path.display(), routes = routes.len(), "Route table saved");
        Ok(())
    }

    /// Run [`RouteStore::save`] on the blocking pool.
    pub async fn save_async(&self, routes: Vec<Route>) -> Result<(), StoreError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.save(&routes))
            .await
            .map_err(|e| StoreError::Write {
                path: self.path.clone(),
                source: std::io::Error::other(e),
            })?
    }
}
