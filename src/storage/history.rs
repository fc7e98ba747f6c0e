use std::fmt::Display;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use log::{info, warn};

use super::{atomic_write_json, data_dir, read_if_exists, StorageError};

/// `"HH:MM - label"`
pub fn format_entry(at: NaiveTime, label: impl Display) -> String {
    format!("{} - {}", at.format("%H:%M"), label)
}

/// Newest-first log of recent loads and completions, capped in length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Keeps the first `capacity` entries of `entries`, which are newest first.
    pub fn from_entries(mut entries: Vec<String>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record(&mut self, at: NaiveTime, label: impl Display) {
        self.entries.insert(0, format_entry(at, label));
        self.entries.truncate(self.capacity);
    }
}

pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/quantread/history.json`
    pub fn at_default_location() -> Result<Self, StorageError> {
        Ok(Self::new(data_dir()?.join("history.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// An unreadable or malformed file is logged and treated as empty.
    pub fn load(&self, capacity: usize) -> History {
        let entries = match read_if_exists(&self.path) {
            Ok(Some(contents)) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring malformed history at {}: {}", self.path.display(), e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("{}", e);
                Vec::new()
            }
        };
        History::from_entries(entries, capacity)
    }

    pub fn save(&self, history: &History) -> Result<(), StorageError> {
        atomic_write_json(&self.path, &history.entries)?;
        info!("Saved {} history entries", history.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_format_entry() {
        assert_eq!(format_entry(at(9, 5), "FILE: notes.txt"), "09:05 - FILE: notes.txt");
    }

    #[test]
    fn test_newest_first_and_capped() {
        let mut history = History::new(5);
        for minute in 0..7 {
            history.record(at(12, minute), format!("entry {minute}"));
        }
        assert_eq!(history.entries().len(), 5);
        assert_eq!(history.entries()[0], "12:06 - entry 6");
        assert_eq!(history.entries()[4], "12:02 - entry 2");
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut history = History::new(0);
        history.record(at(1, 0), "a");
        history.record(at(1, 1), "b");
        assert_eq!(history.entries(), ["01:01 - b"]);
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        let mut history = History::new(5);
        history.record(at(8, 30), "WEB: example.com");
        history.record(at(8, 45), "DONE: 120 words @ 300 WPM");
        store.save(&history).unwrap();

        assert_eq!(store.load(5), history);
    }

    #[test]
    fn test_store_load_truncates_to_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"["a", "b", "c"]"#).unwrap();
        assert_eq!(HistoryStore::new(path).load(2).entries(), ["a", "b"]);
    }

    #[test]
    fn test_store_malformed_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "not json").unwrap();
        assert!(HistoryStore::new(path).load(5).is_empty());
    }
}
