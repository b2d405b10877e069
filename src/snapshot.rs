//! Snapshot persistence.
//!
//! The entire store state is one JSON document, rewritten in full on every
//! mutation. There are no partial or incremental writes; `save` is the only
//! way the on-disk state changes, and its failures are returned to the
//! caller, never logged and swallowed.

use crate::error::{Result, StoreError};
use crate::types::Snapshot;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Handle to the on-disk snapshot file.
///
/// Holds an exclusive advisory lock on a sibling `.lock` file for its whole
/// lifetime, so a second process opening the same store fails with
/// [`StoreError::Locked`] instead of racing the writer.
pub struct SnapshotFile {
    path: PathBuf,
    _lock_file: File,
}

impl SnapshotFile {
    /// Open a handle to the snapshot at `path`, acquiring the process lock.
    ///
    /// Missing parent directories are created; the snapshot file itself is
    /// not touched until the first [`save`](Self::save).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let lock_file = Self::acquire_lock(&path)?;

        Ok(Self {
            path,
            _lock_file: lock_file,
        })
    }

    /// Whether a snapshot already exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the entire snapshot.
    pub fn load(&self) -> Result<Snapshot> {
        let mut file = File::open(&self.path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        serde_json::from_str(&contents).map_err(|e| StoreError::Deserialization(e.to_string()))
    }

    /// Serialize and write the entire snapshot, replacing prior content.
    ///
    /// The document is written to a sibling temp file, synced, and renamed
    /// over the target, so a crash mid-write cannot leave a torn snapshot
    /// behind.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let encoded = serde_json::to_vec(snapshot)?;

        let tmp_path = sibling(&self.path, ".tmp");
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)?;
        file.write_all(&encoded)?;
        file.sync_all()?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    fn acquire_lock(path: &Path) -> Result<File> {
        let lock_file = File::create(sibling(path, ".lock"))?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| StoreError::Locked)?;

        Ok(lock_file)
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
