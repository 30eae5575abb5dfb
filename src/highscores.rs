//! High score leaderboard
//!
//! `HighScores` is the ranked list and its qualification rules.
//! `ScoreBoard` is the engine-side client of a [`ScoreStore`]: it caches the
//! last fetched list and absorbs store failures.

use serde::{Deserialize, Serialize};

use crate::persistence::{ScoreStore, ScoreSubmission};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 20;

/// A single high score entry (wire format `{"initials":"ABC","score":150}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Three uppercase letters
    pub initials: String,
    /// Final score
    pub score: u64,
}

impl HighScoreEntry {
    pub fn new(initials: &str, score: u64) -> Self {
        Self {
            initials: initials.to_string(),
            score,
        }
    }
}

/// High score leaderboard, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Wrap a list fetched from a store (assumed ordered, truncated to max)
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Must beat the lowest (20th) entry
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert an entry in rank order and trim to the maximum size
    ///
    /// Equal scores rank after existing ones. Returns the rank (1-indexed),
    /// or None if the entry fell off the end.
    pub fn insert(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Board rows as shown on the attract screen (`" 1. ABC      150"`)
    pub fn rows(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| format_row(i + 1, e))
            .collect()
    }
}

/// Rank right-aligned to 2, initials padded to 3, score right-aligned to 8
pub fn format_row(rank: usize, entry: &HighScoreEntry) -> String {
    format!("{:>2}. {:<3} {:>8}", rank, entry.initials, entry.score)
}

/// Engine-side client for a score store
///
/// Never fails: a failed fetch shows an empty board, a failed submit keeps
/// the current board. Both are logged.
#[derive(Debug)]
pub struct ScoreBoard<S: ScoreStore> {
    store: S,
    scores: HighScores,
}

impl<S: ScoreStore> ScoreBoard<S> {
    /// Wrap a store; call [`ScoreBoard::refresh`] to load the board
    pub fn new(store: S) -> Self {
        Self {
            store,
            scores: HighScores::new(),
        }
    }

    /// Re-fetch the board from the store
    pub fn refresh(&mut self) -> &HighScores {
        self.scores = match self.store.fetch() {
            Ok(entries) => {
                log::info!("Loaded {} high scores", entries.len());
                HighScores::from_entries(entries)
            }
            Err(e) => {
                log::warn!("Failed to load high scores, showing empty board: {}", e);
                HighScores::new()
            }
        };
        &self.scores
    }

    /// Validate and persist a score, then reload the board
    ///
    /// Returns true if the store accepted it.
    pub fn submit(&mut self, initials: &str, score: u64) -> bool {
        let result =
            ScoreSubmission::new(initials, score).and_then(|sub| self.store.submit(&sub));
        match result {
            Ok(()) => {
                log::info!("High score submitted: {} {}", initials.to_uppercase(), score);
                self.refresh();
                true
            }
            Err(e) => {
                log::warn!("Failed to save high score {} {}: {}", initials, score, e);
                false
            }
        }
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    pub fn qualifies(&self, score: u64) -> bool {
        self.scores.qualifies(score)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryScoreStore, StoreError};
    use proptest::prelude::*;

    fn full_board(lowest: u64) -> HighScores {
        HighScores::from_entries(
            (0..MAX_HIGH_SCORES as u64)
                .map(|i| HighScoreEntry::new("AAA", lowest + (MAX_HIGH_SCORES as u64 - 1 - i) * 10))
                .collect(),
        )
    }

    /// Store that fails every call
    struct DownStore;

    impl ScoreStore for DownStore {
        fn fetch(&self) -> Result<Vec<HighScoreEntry>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }

        fn submit(&mut self, _submission: &ScoreSubmission) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn test_zero_never_qualifies() {
        assert!(!HighScores::new().qualifies(0));
        assert!(!full_board(0).qualifies(0));
    }

    #[test]
    fn test_full_board_requires_beating_lowest() {
        let board = full_board(100);
        assert_eq!(board.len(), MAX_HIGH_SCORES);
        assert!(!board.qualifies(100));
        assert!(board.qualifies(101));
        assert_eq!(board.potential_rank(101), Some(MAX_HIGH_SCORES));
        assert_eq!(board.potential_rank(10_000), Some(1));
    }

    #[test]
    fn test_insert_ranks_and_truncates() {
        let mut board = full_board(100);
        assert_eq!(board.insert(HighScoreEntry::new("NEW", 105)), Some(MAX_HIGH_SCORES));
        assert_eq!(board.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries.last().map(|e| e.score), Some(105));
        assert_eq!(board.insert(HighScoreEntry::new("OUT", 1)), None);
    }

    #[test]
    fn test_rows_format() {
        let board = HighScores::from_entries(vec![HighScoreEntry::new("ABC", 150)]);
        assert_eq!(board.rows(), vec![" 1. ABC      150".to_string()]);
        assert_eq!(board.top_score(), Some(150));
    }

    #[test]
    fn test_board_submit_then_refresh() {
        let mut board = ScoreBoard::new(MemoryScoreStore::new());
        assert!(board.refresh().is_empty());
        assert!(board.submit("abc", 150));
        assert_eq!(board.scores().entries, vec![HighScoreEntry::new("ABC", 150)]);
    }

    #[test]
    fn test_board_rejects_bad_initials_without_touching_store() {
        let mut board = ScoreBoard::new(MemoryScoreStore::new());
        assert!(!board.submit("ab", 150));
        assert!(board.store().is_empty());
    }

    #[test]
    fn test_board_survives_store_outage() {
        let mut board = ScoreBoard::new(DownStore);
        assert!(board.refresh().is_empty());
        assert!(!board.submit("ABC", 150));
        assert!(board.scores().is_empty());
        // An empty board lets any positive score qualify
        assert!(board.qualifies(1));
    }

    proptest! {
        #[test]
        fn prop_qualification_rule(
            mut scores in prop::collection::vec(0u64..10_000, 0..=MAX_HIGH_SCORES),
            candidate in 0u64..10_000,
        ) {
            scores.sort_unstable_by(|a, b| b.cmp(a));
            let board = HighScores::from_entries(
                scores.iter().map(|s| HighScoreEntry::new("AAA", *s)).collect(),
            );
            let expected = candidate > 0
                && (scores.len() < MAX_HIGH_SCORES || candidate > scores[scores.len() - 1]);
            prop_assert_eq!(board.qualifies(candidate), expected);
        }
    }
}
