//! Beam messages: text pushed into the reader by another program.
//!
//! One JSON object per line, e.g. `{"type": "BEAM", "text": "..."}`.

use std::io::BufRead;

use log::{info, warn};
use serde::Deserialize;

use super::{DocumentSource, LoadError, LoadedDocument};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum BeamMessage {
    #[serde(rename = "BEAM", alias = "QUANTREAD_BEAM")]
    Beam { text: String },

    /// Sender handshake; carries no text.
    #[serde(rename = "READY")]
    Ready,

    #[serde(other)]
    Unknown,
}

pub fn parse_message(line: &str) -> Result<BeamMessage, serde_json::Error> {
    serde_json::from_str(line)
}

/// Reads messages until end of input and returns the text of the last
/// non-blank beam, if any.
pub fn receive<R: BufRead>(reader: R) -> Result<Option<LoadedDocument>, LoadError> {
    let mut latest = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| LoadError::Beam {
            line: index + 1,
            message: e.to_string(),
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let message = parse_message(&line).map_err(|e| LoadError::Beam {
            line: index + 1,
            message: e.to_string(),
        })?;
        match message {
            BeamMessage::Beam { text } if text.trim().is_empty() => {
                warn!("Ignoring empty beam on line {}", index + 1);
            }
            BeamMessage::Beam { text } => {
                info!("Received beam of {} bytes", text.len());
                latest = Some(text);
            }
            BeamMessage::Ready => info!("Beam sender ready"),
            BeamMessage::Unknown => warn!("Ignoring unknown beam message on line {}", index + 1),
        }
    }

    Ok(latest.map(|text| LoadedDocument {
        text,
        source: DocumentSource::Beam,
    }))
}
