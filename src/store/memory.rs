//! In-memory transactional record store
//!
//! Writers are serialized by a single `RwLock`. A [`StoreTransaction`] edits a
//! private copy of the tables while holding the write lock and swaps it in on
//! [`StoreTransaction::commit`]; dropping it without committing discards every
//! change, so readers only ever observe whole transactions.

use crate::error::StoreError;
use crate::store::records::Records;
use crate::store::snapshot;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Records>,
    snapshot_path: Option<PathBuf>,
}

impl InMemoryStore {
    /// Create an empty, purely in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store backed by a JSON snapshot file, loading it if present
    pub fn with_snapshot(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match snapshot::load(&path)? {
            Some(records) => {
                info!(
                    "Loaded snapshot from {} - teams: {}, matches: {}, rankings: {}",
                    path.display(),
                    records.team_count(),
                    records.match_count(),
                    records.ranking_count()
                );
                records
            }
            None => {
                info!("No snapshot at {}, starting empty", path.display());
                Records::new()
            }
        };

        Ok(Self {
            records: RwLock::new(records),
            snapshot_path: Some(path),
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Read access to the last committed state
    pub fn read(&self) -> Result<RwLockReadGuard<'_, Records>, StoreError> {
        self.records
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))
    }

    /// Open a write transaction
    pub fn begin(&self) -> Result<StoreTransaction<'_>, StoreError> {
        let guard = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;
        let working = guard.clone();

        Ok(StoreTransaction {
            guard,
            working,
            snapshot_path: self.snapshot_path.as_deref(),
        })
    }
}

/// An open write transaction; dereferences to the working copy of the tables
pub struct StoreTransaction<'a> {
    guard: RwLockWriteGuard<'a, Records>,
    working: Records,
    snapshot_path: Option<&'a Path>,
}

impl StoreTransaction<'_> {
    /// Publish the working copy. If the snapshot write fails the committed
    /// state is left as it was.
    pub fn commit(mut self) -> Result<(), StoreError> {
        if let Some(path) = self.snapshot_path {
            snapshot::write(path, &self.working)?;
            debug!("Snapshot written to {}", path.display());
        }

        *self.guard = std::mem::take(&mut self.working);
        Ok(())
    }
}

impl Deref for StoreTransaction<'_> {
    type Target = Records;

    fn deref(&self) -> &Records {
        &self.working
    }
}

impl DerefMut for StoreTransaction<'_> {
    fn deref_mut(&mut self) -> &mut Records {
        &mut self.working
    }
}
