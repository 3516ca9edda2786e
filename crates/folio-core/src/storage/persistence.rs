//! JSON record persistence
//!
//! Every record (draft, published snapshot, each history entry) lives in its
//! own JSON file. Writes go to a uniquely named temp file in the same
//! directory which is synced and then renamed over the target, so readers
//! see either the old record or the new one, never a partial write.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::error::{StoreError, StoreResult};

/// Read and parse a JSON record
///
/// Returns `None` if the file doesn't exist.
/// Returns `Malformed` if the file exists but can't be parsed.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::from_read_io(e, path.to_path_buf())),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StoreError::Malformed {
            path: path.to_path_buf(),
            details: e.to_string(),
        })
}

/// Serialize a record as pretty JSON and write it atomically
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    atomic_write(path, &to_json_bytes(path, value)?)
}

/// Serialize a record and write it only if `path` does not exist yet
///
/// Returns `Ok(false)` and leaves the existing file untouched when the
/// target is already taken.
pub fn create_json<T: Serialize>(path: &Path, value: &T) -> StoreResult<bool> {
    atomic_create(path, &to_json_bytes(path, value)?)
}

fn to_json_bytes<T: Serialize>(path: &Path, value: &T) -> StoreResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| StoreError::from_io(io::Error::from(e), path.to_path_buf()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// The temp name is unique per call, so concurrent writers to the same
/// target never share a temp file. Last rename wins.
pub fn atomic_write(path: &Path, data: &[u8]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(path);

    let result = write_and_sync(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|source| StoreError::AtomicWriteFailed {
            from: temp_path.clone(),
            to: path.to_path_buf(),
            source,
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

/// Write data to a new file atomically, never replacing an existing one
///
/// Same as `atomic_write`, except the synced temp file is hard-linked to
/// the target instead of renamed over it. The link fails if the target
/// exists, which makes the existence check and the write a single step.
pub fn atomic_create(path: &Path, data: &[u8]) -> StoreResult<bool> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(path);

    let result = write_and_sync(&temp_path, data).and_then(|()| {
        match fs::hard_link(&temp_path, path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(source) => Err(StoreError::AtomicWriteFailed {
                from: temp_path.clone(),
                to: path.to_path_buf(),
                source,
            }),
        }
    });

    let _ = fs::remove_file(&temp_path);

    result
}

/// Whether a directory entry name belongs to an in-flight atomic write
pub fn is_temp_file(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(".tmp")
}

fn write_and_sync(path: &Path, data: &[u8]) -> StoreResult<()> {
    let mut file = File::create(path).map_err(|e| StoreError::from_io(e, path.to_path_buf()))?;

    file.write_all(data)
        .map_err(|e| StoreError::from_io(e, path.to_path_buf()))?;

    file.sync_all()
        .map_err(|e| StoreError::from_io(e, path.to_path_buf()))?;

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4().simple()))
}
