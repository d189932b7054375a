//! High score persistence
//!
//! The record is a single JSON integer in a file. Anything unreadable on
//! load counts as "no record yet".

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("high score is not a JSON integer: {0}")]
    Json(#[from] serde_json::Error),
}

/// Get/set access to the persisted high score
pub trait ScoreStore {
    /// Stored value, or 0 when there is none
    fn get(&self) -> u32;
    fn set(&mut self, value: u32) -> Result<(), StoreError>;
}

/// High score kept as JSON in a file
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<u32, StoreError> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl ScoreStore for JsonFile {
    fn get(&self) -> u32 {
        match self.read() {
            Ok(score) => {
                log::info!("Loaded high score {} from {}", score, self.path.display());
                score
            }
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score file, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn set(&mut self, value: u32) -> Result<(), StoreError> {
        let json = serde_json::to_string(&value)?;
        fs::write(&self.path, json)?;
        log::debug!("High score {} saved", value);
        Ok(())
    }
}

/// In-memory store that counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: u32,
    pub writes: usize,
}

impl ScoreStore for MemoryStore {
    fn get(&self) -> u32 {
        self.value
    }

    fn set(&mut self, value: u32) -> Result<(), StoreError> {
        self.value = value;
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFile::new(dir.path().join("highscore.json"));
        assert_eq!(store.get(), 0);
    }

    #[test]
    fn test_malformed_file_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.json");
        for junk in ["", "not json", "-4", "12.5", "{\"score\": 3}"] {
            fs::write(&path, junk).unwrap();
            assert_eq!(JsonFile::new(&path).get(), 0, "{junk:?}");
        }
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.json");
        let mut store = JsonFile::new(&path);
        store.set(17).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "17");
        store.set(18).unwrap();
        assert_eq!(JsonFile::new(&path).get(), 18);
    }

    #[test]
    fn test_reads_hand_written_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.json");
        fs::write(&path, "42\n").unwrap();
        assert_eq!(JsonFile::new(&path).get(), 42);
    }

    #[test]
    fn test_write_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFile::new(dir.path().join("missing").join("highscore.json"));
        assert!(matches!(store.set(3), Err(StoreError::Io(_))));
    }
}
