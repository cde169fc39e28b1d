//! High-score table and its persistence boundary
//!
//! The table holds at most [`HIGH_SCORE_LIMIT`] entries sorted by descending
//! score. Storage failures never reach the game: a table that cannot be read
//! starts empty, and a table that cannot be written stays in memory.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::game::GameResult;
use crate::types::{GameMode, HIGH_SCORE_LIMIT};

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("high score data is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One row of the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
    pub mode: GameMode,
    pub lines_cleared: u32,
    pub level: u32,
    pub date: String,
}

impl HighScoreEntry {
    pub fn from_result(name: impl Into<String>, result: &GameResult) -> Self {
        Self {
            name: name.into(),
            score: result.score,
            mode: result.mode,
            lines_cleared: result.lines_cleared,
            level: result.level,
            date: result.date.clone(),
        }
    }
}

/// Where the table lives between runs
pub trait HighScoreStore: fmt::Debug {
    fn load(&self) -> Result<Vec<HighScoreEntry>, HighScoreError>;
    fn save(&mut self, entries: &[HighScoreEntry]) -> Result<(), HighScoreError>;
}

/// Pretty-printed JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for JsonFileStore {
    /// A missing file is an empty table, not an error.
    fn load(&self) -> Result<Vec<HighScoreEntry>, HighScoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&mut self, entries: &[HighScoreEntry]) -> Result<(), HighScoreError> {
        let text = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

/// Keeps the table in memory only (tests, headless runs without a file)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<HighScoreEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<HighScoreEntry>) -> Self {
        Self { entries }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Vec<HighScoreEntry>, HighScoreError> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[HighScoreEntry]) -> Result<(), HighScoreError> {
        self.entries = entries.to_vec();
        Ok(())
    }
}

/// The high-score table bound to a store
#[derive(Debug)]
pub struct HighScores {
    store: Box<dyn HighScoreStore>,
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Load the table, substituting an empty one if the store fails
    pub fn load(store: impl HighScoreStore + 'static) -> Self {
        let mut entries = match store.load() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, ?store, "failed to load high scores, starting empty");
                Vec::new()
            }
        };
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(HIGH_SCORE_LIMIT);

        Self {
            store: Box::new(store),
            entries,
        }
    }

    pub fn in_memory() -> Self {
        Self::load(MemoryStore::new())
    }

    /// All entries, best first
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Up to `limit` best entries, optionally restricted to one mode
    pub fn top(
        &self,
        mode: Option<GameMode>,
        limit: usize,
    ) -> impl Iterator<Item = &HighScoreEntry> + '_ {
        self.entries
            .iter()
            .filter(move |e| mode.map_or(true, |m| e.mode == m))
            .take(limit)
    }

    /// Whether `score` would enter the table
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        self.entries.len() < HIGH_SCORE_LIMIT
            || self.entries.last().is_some_and(|last| score > last.score)
    }

    /// Insert a qualifying entry and persist the table
    ///
    /// Returns the 0-based rank, or `None` if the score did not qualify. Ties
    /// rank below entries already present. A failed save is logged and the
    /// in-memory table is kept.
    pub fn record(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        let rank = self.entries.partition_point(|e| e.score >= entry.score);
        info!(name = %entry.name, score = entry.score, rank, "new high score");
        self.entries.insert(rank, entry);
        self.entries.truncate(HIGH_SCORE_LIMIT);

        if let Err(e) = self.store.save(&self.entries) {
            warn!(error = %e, "failed to save high scores");
        }

        Some(rank)
    }
}
