use std::fmt;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

pub mod beam;
pub mod clipboard;
pub mod pdf;
pub mod sanitize;
pub mod text;
pub mod web;

pub use pdf::PdfExtractor;
pub use web::WebFetcher;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("No readable text in {0}")]
    EmptyFile(PathBuf),

    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF parse error: {0}")]
    PdfParse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Beam message on line {line}: {message}")]
    Beam { line: usize, message: String },
}

/// Where a document came from; shown in the history log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    File(String),
    Pdf(String),
    /// Host name of the fetched page.
    Web(String),
    Beam,
    Clipboard,
    /// Typed into the command deck or passed with `--text`.
    Text,
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::File(name) => write!(f, "FILE: {name}"),
            DocumentSource::Pdf(name) => write!(f, "PDF: {name}"),
            DocumentSource::Web(host) => write!(f, "WEB: {host}"),
            DocumentSource::Beam => write!(f, "BEAM"),
            DocumentSource::Clipboard => write!(f, "CLIPBOARD"),
            DocumentSource::Text => write!(f, "TEXT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub text: String,
    pub source: DocumentSource,
}

impl LoadedDocument {
    /// Manually entered text, taken as-is.
    pub fn manual(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: DocumentSource::Text,
        }
    }
}

/// Routes a source argument to the right loader.
pub struct Acquisition {
    pdf: PdfExtractor,
    web: WebFetcher,
}

impl Acquisition {
    pub fn new(pdf: PdfExtractor, web: WebFetcher) -> Self {
        Self { pdf, web }
    }

    /// `http(s)://` addresses are fetched, anything else is a local path.
    pub fn load_source(&mut self, source: &str) -> Result<LoadedDocument, LoadError> {
        let source = source.trim();
        if web::is_web_address(source) {
            self.load_url(source)
        } else {
            self.load_path(Path::new(source))
        }
    }

    /// `.pdf` files (any case) go through the PDF extractor, others are read as text.
    pub fn load_path(&mut self, path: &Path) -> Result<LoadedDocument, LoadError> {
        info!("Loading {}", path.display());
        if is_pdf(path) {
            self.pdf.load(path)
        } else {
            text::load(path)
        }
    }

    pub fn load_url(&mut self, url: &str) -> Result<LoadedDocument, LoadError> {
        self.web.fetch(url)
    }

    pub fn load_clipboard(&mut self) -> Result<LoadedDocument, LoadError> {
        clipboard::load()
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::WebConfig;
    use std::fs;

    fn acquisition() -> Acquisition {
        Acquisition::new(PdfExtractor::new(), WebFetcher::new(WebConfig::default()))
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(DocumentSource::File("a.txt".into()).to_string(), "FILE: a.txt");
        assert_eq!(DocumentSource::Pdf("b.pdf".into()).to_string(), "PDF: b.pdf");
        assert_eq!(DocumentSource::Web("example.com".into()).to_string(), "WEB: example.com");
        assert_eq!(DocumentSource::Beam.to_string(), "BEAM");
        assert_eq!(DocumentSource::Clipboard.to_string(), "CLIPBOARD");
        assert_eq!(DocumentSource::Text.to_string(), "TEXT");
    }

    #[test]
    fn test_is_pdf_any_case() {
        assert!(is_pdf(Path::new("paper.pdf")));
        assert!(is_pdf(Path::new("PAPER.PDF")));
        assert!(!is_pdf(Path::new("paper.txt")));
        assert!(!is_pdf(Path::new("pdf")));
    }

    #[test]
    fn test_load_source_routes_text_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story.md");
        fs::write(&path, "Once upon a time").unwrap();

        let doc = acquisition().load_source(path.to_str().unwrap()).unwrap();
        assert_eq!(doc.text, "Once upon a time");
        assert_eq!(doc.source, DocumentSource::File("story.md".into()));
    }

    #[test]
    fn test_load_source_routes_pdf_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.PDF");
        fs::write(&path, "plain text pretending").unwrap();

        let result = acquisition().load_source(path.to_str().unwrap());
        assert!(matches!(result, Err(LoadError::PdfParse(_))));
    }

    #[test]
    fn test_load_source_missing_path() {
        let result = acquisition().load_source("/nonexistent/quantread/missing.txt");
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    }

    #[test]
    fn test_manual_text_is_untouched() {
        let doc = LoadedDocument::manual("  <b>raw</b>  ");
        assert_eq!(doc.text, "  <b>raw</b>  ");
        assert_eq!(doc.source, DocumentSource::Text);
    }
}
