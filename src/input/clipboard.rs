use log::info;

use super::{DocumentSource, LoadError, LoadedDocument};

/// Reads the system clipboard as text. Pasted text is not sanitized.
pub fn load() -> Result<LoadedDocument, LoadError> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| LoadError::Clipboard(e.to_string()))?;
    let text = clipboard
        .get_text()
        .map_err(|e| LoadError::Clipboard(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(LoadError::Clipboard("clipboard holds no text".to_string()));
    }

    info!("Read {} bytes from clipboard", text.len());
    Ok(LoadedDocument {
        text,
        source: DocumentSource::Clipboard,
    })
}
