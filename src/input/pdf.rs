use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};

use super::sanitize::sanitize_text;
use super::text::file_name;
use super::{DocumentSource, LoadError, LoadedDocument};

/// PDF text extraction backed by the pdf-extract crate.
///
/// Built once by the caller and handed to `Acquisition`; there is no shared
/// global handle.
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        debug!("PDF extractor ready");
        Self
    }

    pub fn load(&self, path: &Path) -> Result<LoadedDocument, LoadError> {
        let buffer = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let text = self.extract(&buffer)?;
        if text.is_empty() {
            return Err(LoadError::EmptyFile(path.to_path_buf()));
        }

        info!("Extracted {} bytes of text from {}", text.len(), path.display());
        Ok(LoadedDocument {
            text,
            source: DocumentSource::Pdf(file_name(path)),
        })
    }

    /// Extracts and sanitizes the text of an in-memory PDF.
    pub fn extract(&self, bytes: &[u8]) -> Result<String, LoadError> {
        let raw = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| LoadError::PdfParse(e.to_string()))?;
        Ok(sanitize_text(&raw))
    }
}
