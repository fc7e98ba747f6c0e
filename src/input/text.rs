use std::fs;
use std::io;
use std::path::Path;

use super::sanitize::sanitize_text;
use super::{DocumentSource, LoadError, LoadedDocument};

/// Load a UTF-8 text file.
pub fn load(path: &Path) -> Result<LoadedDocument, LoadError> {
    let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let text = sanitize_text(&raw);
    if text.is_empty() {
        return Err(LoadError::EmptyFile(path.to_path_buf()));
    }

    Ok(LoadedDocument {
        text,
        source: DocumentSource::File(file_name(path)),
    })
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
