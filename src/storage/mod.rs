//! Small JSON stores under the user's config and data directories.
//!
//! Writes go to a `.tmp` sibling first and are renamed into place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

pub mod history;
pub mod preferences;

pub use history::{History, HistoryStore};
pub use preferences::{PreferenceStore, Preferences};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No {0} directory on this platform")]
    NoDirectory(&'static str),
}

/// `<config_dir>/quantread`
pub fn config_dir() -> Result<PathBuf, StorageError> {
    dirs::config_dir()
        .map(|dir| dir.join("quantread"))
        .ok_or(StorageError::NoDirectory("config"))
}

/// `<data_dir>/quantread`
pub fn data_dir() -> Result<PathBuf, StorageError> {
    dirs::data_dir()
        .map(|dir| dir.join("quantread"))
        .ok_or(StorageError::NoDirectory("data"))
}

/// Writes `data` as pretty JSON to `path` via `.tmp` + rename, creating the
/// parent directory if needed.
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StorageError> {
    let io_error = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let json = serde_json::to_string_pretty(data).map_err(|source| StorageError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, json).map_err(io_error)?;
    fs::rename(&tmp_path, path).map_err(io_error)?;
    Ok(())
}

/// Reads `path` if it exists. `Ok(None)` means there is no file yet.
fn read_if_exists(path: &Path) -> Result<Option<String>, StorageError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StorageError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_creates_parent_and_leaves_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("value.json");
        atomic_write_json(&path, &vec![1, 2, 3]).unwrap();

        assert_eq!(read_if_exists(&path).unwrap().unwrap().replace(char::is_whitespace, ""), "[1,2,3]");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_if_exists(&dir.path().join("absent.json")).unwrap().is_none());
    }
}
