//! Atomic file operations.
//!
//! All stores write through [`atomic_write_json`]: data goes to a temp file
//! in the target directory first, then a rename swaps it into place. The
//! rename is the commit point, so a crash mid-write leaves the previous
//! snapshot intact and concurrent readers never see a half-written file.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{PersistenceError, Result};

/// Writes raw bytes to `path` atomically.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::DirectoryError {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    // Temp file must live in the target directory so the rename stays on
    // one filesystem.
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|source| {
        PersistenceError::WriteError {
            path: path.to_path_buf(),
            source,
        }
    })?;

    temp.write_all(data)
        .and_then(|_| temp.flush())
        .map_err(|source| PersistenceError::WriteError {
            path: path.to_path_buf(),
            source,
        })?;

    temp.persist(path).map_err(|e| PersistenceError::WriteError {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

/// Serializes `value` as pretty JSON and writes it atomically.
pub fn atomic_write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, json.as_bytes())
}

/// Reads and deserializes a JSON file.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|source| PersistenceError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&data)?)
}

/// Reads a JSON file, returning `None` when it does not exist yet.
pub fn read_json_optional<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    read_json(path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::tempdir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Record {
        name: String,
        value: i32,
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("record.json");

        let record = Record {
            name: "film042".to_string(),
            value: 42,
        };
        atomic_write_json(&path, &record).unwrap();

        let loaded: Record = read_json(&path).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/record.json");

        atomic_write(&path, b"{}").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_overwrite_replaces_whole_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("record.json");

        atomic_write(&path, b"first snapshot, quite long").unwrap();
        atomic_write(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_read_optional_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let loaded: Option<Record> = read_json_optional(&path).unwrap();
        assert!(loaded.is_none());
    }
}
