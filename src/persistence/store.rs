//! Score store backends
//!
//! Both backends keep the server semantics: insert, sort best first with
//! ties keeping earlier entries ahead, and truncate to the top 20.

use std::fs;
use std::path::{Path, PathBuf};

use super::{ScoreStore, ScoreSubmission, StoreError};
use crate::highscores::{HighScoreEntry, HighScores, MAX_HIGH_SCORES};

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    board: HighScores,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing entries (re-ranked and truncated)
    pub fn with_entries(entries: impl IntoIterator<Item = HighScoreEntry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            store.board.insert(entry);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.board.len()
    }

    pub fn is_empty(&self) -> bool {
        self.board.is_empty()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn fetch(&self) -> Result<Vec<HighScoreEntry>, StoreError> {
        Ok(self.board.entries.clone())
    }

    fn submit(&mut self, submission: &ScoreSubmission) -> Result<(), StoreError> {
        self.board.insert(submission.to_entry());
        Ok(())
    }
}

/// Store backed by a JSON file holding the ordered entry array
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open (or lazily create) a store at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<HighScoreEntry>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut entries: Vec<HighScoreEntry> = serde_json::from_str(&json)?;
        // Tolerate hand-edited files
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Ok(entries)
    }

    /// Write via a temp file so a crash never leaves a half-written board
    fn write(&self, entries: &[HighScoreEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn fetch(&self) -> Result<Vec<HighScoreEntry>, StoreError> {
        self.read()
    }

    fn submit(&mut self, submission: &ScoreSubmission) -> Result<(), StoreError> {
        let mut board = HighScores::from_entries(self.read()?);
        board.insert(submission.to_entry());
        self.write(&board.entries)?;
        log::info!(
            "Saved {} {} to {}",
            submission.initials(),
            submission.score(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sub(initials: &str, score: u64) -> ScoreSubmission {
        ScoreSubmission::new(initials, score).unwrap()
    }

    fn test_store() -> (JsonFileStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("scores.json")).unwrap();
        (store, dir)
    }

    #[test]
    fn test_memory_store_keeps_top_twenty() {
        let mut store = MemoryScoreStore::new();
        for score in 1..=25 {
            store.submit(&sub("AAA", score * 10)).unwrap();
        }
        let entries = store.fetch().unwrap();
        assert_eq!(entries.len(), MAX_HIGH_SCORES);
        assert_eq!(entries[0].score, 250);
        assert_eq!(entries[19].score, 60);
    }

    #[test]
    fn test_ties_keep_earlier_entries_first() {
        let mut store = MemoryScoreStore::new();
        store.submit(&sub("AAA", 100)).unwrap();
        store.submit(&sub("BBB", 100)).unwrap();
        let entries = store.fetch().unwrap();
        assert_eq!(entries[0].initials, "AAA");
        assert_eq!(entries[1].initials, "BBB");
    }

    #[test]
    fn test_with_entries_reranks() {
        let store = MemoryScoreStore::with_entries([
            HighScoreEntry::new("LOW", 5),
            HighScoreEntry::new("TOP", 50),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.fetch().unwrap()[0].initials, "TOP");
    }

    #[test]
    fn test_missing_file_is_empty_board() {
        let (store, _dir) = test_store();
        assert!(store.fetch().unwrap().is_empty());
    }

    #[test]
    fn test_file_round_trip_uses_wire_format() {
        let (mut store, _dir) = test_store();
        store.submit(&sub("abc", 150)).unwrap();
        store.submit(&sub("XYZ", 300)).unwrap();

        let entries = store.fetch().unwrap();
        assert_eq!(
            entries,
            vec![HighScoreEntry::new("XYZ", 300), HighScoreEntry::new("ABC", 150)]
        );

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[1]["initials"], "ABC");
        assert_eq!(value[1]["score"], 150);
    }

    #[test]
    fn test_corrupt_file_reports_json_error() {
        let (store, _dir) = test_store();
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.fetch(), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/scores.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        store.submit(&sub("NEW", 1)).unwrap();
        assert!(path.exists());
    }
}
