//! High score persistence
//!
//! A single best score, stored as one line of text.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score file is not a number: {0:?}")]
    Parse(String),
}

/// Where the best score lives between runs
pub trait HighScoreStore {
    /// Stored score, or 0 when there is none or it can't be read
    fn load(&self) -> u64;
    fn save(&mut self, score: u64) -> Result<(), HighScoreError>;
}

/// High score kept in a one-line text file
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the file, surfacing every failure
    pub fn read(&self) -> Result<u64, HighScoreError> {
        let text = fs::read_to_string(&self.path)?;
        let line = text.lines().next().unwrap_or("").trim();
        line.parse()
            .map_err(|_| HighScoreError::Parse(line.to_string()))
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> u64 {
        match self.read() {
            Ok(score) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Err(HighScoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => {
                log::warn!("Ignoring {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u64) -> Result<(), HighScoreError> {
        fs::write(&self.path, format!("{}\n", score))?;
        log::info!("High score {} saved", score);
        Ok(())
    }
}

/// In-memory store that records every save
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub score: u64,
    pub saves: Vec<u64>,
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> u64 {
        self.score
    }

    fn save(&mut self, score: u64) -> Result<(), HighScoreError> {
        self.score = score;
        self.saves.push(score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dopaman_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_is_zero() {
        let store = FileHighScoreStore::new(temp_path("no_highscore.txt"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("highscore_roundtrip.txt");
        let mut store = FileHighScoreStore::new(&path);
        store.save(1234).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1234\n");
        assert_eq!(store.load(), 1234);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_garbage_is_zero() {
        let path = temp_path("highscore_garbage.txt");
        fs::write(&path, "lots\n").unwrap();
        let store = FileHighScoreStore::new(&path);
        assert!(matches!(store.read(), Err(HighScoreError::Parse(_))));
        assert_eq!(store.load(), 0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_write_failure_is_reported() {
        // A directory can't be written as a file
        let mut store = FileHighScoreStore::new(std::env::temp_dir());
        assert!(store.save(10).is_err());
    }

    #[test]
    fn test_memory_store_records_saves() {
        let mut store = MemoryHighScoreStore::default();
        store.save(5).unwrap();
        store.save(9).unwrap();
        assert_eq!(store.load(), 9);
        assert_eq!(store.saves, vec![5, 9]);
    }
}
