//! Session configuration, read from environment variables.

use std::env;
use std::path::PathBuf;

use crate::types::LOCK_DELAY_MS;

pub const DEFAULT_PLAYER_NAME: &str = "Player";
pub const DEFAULT_HIGH_SCORE_FILE: &str = "blockfall_highscores.json";

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Fixed generator seed; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Name recorded with qualifying scores
    pub player_name: String,
    pub high_score_path: PathBuf,
    pub lock_delay_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            high_score_path: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
            lock_delay_ms: LOCK_DELAY_MS,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    ///
    /// Absent or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (the environment, a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok());

        let player_name = lookup("BLOCKFALL_PLAYER")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.player_name);

        let high_score_path = lookup("BLOCKFALL_HIGHSCORES")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.high_score_path);

        let lock_delay_ms = lookup("BLOCKFALL_LOCK_DELAY_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.lock_delay_ms);

        Self {
            seed,
            player_name,
            high_score_path,
            lock_delay_ms,
        }
    }
}
