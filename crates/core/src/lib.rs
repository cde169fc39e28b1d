//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, the session state machine and the
//! high-score boundary. It has no dependencies on rendering, input devices
//! or networking, and never sleeps: all timing comes from the caller through
//! `update(elapsed_ms)`.
//!
//! # Module Structure
//!
//! - [`pieces`]: tetromino shape catalog and clockwise rotation with wall kicks
//! - [`piece`]: an active piece (kind, rotation, anchor)
//! - [`board`]: 10x20 grid with collision checks and line clearing
//! - [`rng`]: uniform (or scripted) piece generation
//! - [`scoring`]: per-lock score with combo and back-to-back bonuses
//! - [`mode`]: level, gravity and end conditions for Classic, Sprint and Marathon
//! - [`game`]: the engine tying the above together
//! - [`session`]: Menu / Playing / Paused / GameOver / HighScores state machine
//! - [`highscores`]: top-10 table with tolerant JSON persistence
//! - [`config`]: environment-driven session settings
//!
//! # Example
//!
//! ```
//! use blockfall_core::{HighScores, Session, SessionConfig, SessionState};
//! use blockfall_core::types::{GameAction, GameMode};
//!
//! let config = SessionConfig { seed: Some(12345), ..SessionConfig::default() };
//! let mut session = Session::new(config, HighScores::in_memory());
//! assert!(session.start(GameMode::Classic));
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::Rotate);
//! session.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(session.state(), SessionState::Playing);
//! assert!(session.game().is_some_and(|g| g.score() > 0)); // hard drop awards points
//! ```

pub mod board;
pub mod config;
pub mod game;
pub mod highscores;
pub mod mode;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::SessionConfig;
pub use game::{Game, GameOutcome, GameResult, LockEvent};
pub use highscores::{
    HighScoreEntry, HighScoreError, HighScoreStore, HighScores, JsonFileStore, MemoryStore,
};
pub use piece::Piece;
pub use pieces::{get_shape, try_rotate, PieceShape};
pub use rng::PieceGenerator;
pub use scoring::{calculate_drop_score, calculate_score, ScoreResult};
pub use session::{Session, SessionState};
pub use snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
