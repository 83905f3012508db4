//! JSON snapshot persistence for the record store

use crate::error::StoreError;
use crate::store::records::Records;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Load records from `path`. A missing file yields `None`.
pub fn load(path: &Path) -> Result<Option<Records>, StoreError> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::SnapshotIo {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut records: Records = serde_json::from_slice(&data)?;
    if records.reconcile()? {
        warn!(
            "Snapshot {} had id sequences behind its rows; raised them",
            path.display()
        );
    }
    Ok(Some(records))
}

/// Write records to `path`: temp file, fsync, rename, then fsync of the
/// parent directory so the rename itself is durable.
pub fn write(path: &Path, records: &Records) -> Result<(), StoreError> {
    let data = serde_json::to_vec_pretty(records)?;
    let tmp_path = temp_path(path);

    {
        let mut file = File::create(&tmp_path).map_err(io_error(&tmp_path))?;
        file.write_all(&data).map_err(io_error(&tmp_path))?;
        file.sync_all().map_err(io_error(&tmp_path))?;
    }
    fs::rename(&tmp_path, path).map_err(io_error(path))?;
    sync_parent_dir(path)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::SnapshotIo { path, source }
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    File::open(dir)
        .and_then(|handle| handle.sync_all())
        .map_err(io_error(dir))
}

// Directories cannot be opened for syncing on other platforms
#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
