//! High score persistence
//!
//! The engine talks to a score store through [`ScoreStore`]:
//! - `fetch`: ordered entries, best first, at most 20
//! - `submit`: insert one validated submission, keep the top 20
//!
//! Submissions are validated once, in [`ScoreSubmission`]. Store failures
//! are reported as [`StoreError`] and never reach the simulation.

pub mod store;

pub use store::{JsonFileStore, MemoryScoreStore};

use serde::Deserialize;
use thiserror::Error;

use crate::highscores::HighScoreEntry;

/// Number of characters in a set of initials
pub const INITIALS_LEN: usize = 3;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Initials must be exactly 3 characters")]
    InvalidInitials,
    #[error("Score must be a non-negative number")]
    InvalidScore,
    #[error("Score store I/O failed")]
    Io(#[from] std::io::Error),
    #[error("Score store data is malformed")]
    Json(#[from] serde_json::Error),
    #[error("Score store unavailable: {0}")]
    Unavailable(String),
}

/// A validated `{initials, score}` pair ready for the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmission {
    initials: String,
    score: u64,
}

/// Submission body as it arrives on the wire, before validation
#[derive(Debug, Deserialize)]
struct WireSubmission {
    initials: String,
    score: i64,
}

impl ScoreSubmission {
    /// Validate and normalize: exactly 3 ASCII letters, stored uppercase
    pub fn new(initials: &str, score: u64) -> Result<Self, StoreError> {
        let initials = initials.to_uppercase();
        if initials.chars().count() != INITIALS_LEN
            || !initials.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(StoreError::InvalidInitials);
        }
        Ok(Self { initials, score })
    }

    /// Parse and validate a JSON submission body
    pub fn from_json(body: &str) -> Result<Self, StoreError> {
        let wire: WireSubmission = serde_json::from_str(body)?;
        let score = u64::try_from(wire.score).map_err(|_| StoreError::InvalidScore)?;
        Self::new(&wire.initials, score)
    }

    pub fn initials(&self) -> &str {
        &self.initials
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn to_entry(&self) -> HighScoreEntry {
        HighScoreEntry {
            initials: self.initials.clone(),
            score: self.score,
        }
    }
}

/// Score store collaborator
pub trait ScoreStore {
    /// Entries ordered best first (at most 20)
    fn fetch(&self) -> Result<Vec<HighScoreEntry>, StoreError>;

    /// Insert a submission and keep only the top 20
    fn submit(&mut self, submission: &ScoreSubmission) -> Result<(), StoreError>;
}
