use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{atomic_write_json, config_dir, read_if_exists, StorageError};
use crate::reading::DisplayCase;

/// Reader settings remembered between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub wpm: u32,
    #[serde(default)]
    pub display_case: DisplayCase,
}

pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/quantread/preferences.json`
    pub fn at_default_location() -> Result<Self, StorageError> {
        Ok(Self::new(config_dir()?.join("preferences.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file gives `None`. An unreadable or malformed file is logged
    /// and also gives `None`, so the caller falls back to its defaults.
    pub fn load(&self) -> Option<Preferences> {
        let contents = match read_if_exists(&self.path) {
            Ok(Some(contents)) => contents,
            Ok(None) => return None,
            Err(e) => {
                warn!("{}", e);
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(preferences) => {
                info!("Loaded preferences from {}", self.path.display());
                Some(preferences)
            }
            Err(e) => {
                warn!("Ignoring malformed preferences at {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn save(&self, preferences: &Preferences) -> Result<(), StorageError> {
        atomic_write_json(&self.path, preferences)?;
        info!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}
