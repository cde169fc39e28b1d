//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no required dependencies, so they can be used
//! by the engine, a renderer, or a persistence layer alike. Enable the `serde`
//! feature to derive `Serialize`/`Deserialize` on the enums that appear in
//! persisted records.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn anchor**: (4, 0), i.e. `BOARD_WIDTH / 2 - 1` on the top row
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Driver cadence (~60 FPS) |
//! | `BASE_FALL_MS` | 1000 | Gravity at level 1 |
//! | `FALL_STEP_MS` | 60 | Gravity speed-up per level |
//! | `MIN_FALL_MS` | 50 | Gravity floor |
//! | `SPRINT_FALL_MS` | 500 | Fixed gravity in sprint mode |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a grounded piece locks |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameMode, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.id(), 3);
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameMode::from_str("sprint"), Some(GameMode::Sprint));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed driver interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_FALL_MS: u32 = 1000;

/// Gravity speed-up per level above 1
pub const FALL_STEP_MS: u32 = 60;

/// Fastest gravity interval for the leveled modes
pub const MIN_FALL_MS: u32 = 50;

/// Fixed gravity interval in sprint mode
pub const SPRINT_FALL_MS: u32 = 500;

/// Lock delay once the active piece cannot fall any further
pub const LOCK_DELAY_MS: u32 = 500;

/// Lines required to finish a sprint
pub const SPRINT_TARGET_LINES: u32 = 40;

/// Level cap in marathon mode
pub const MARATHON_MAX_LEVEL: u32 = 15;

/// Lines per level in classic mode
pub const CLASSIC_LINES_PER_LEVEL: u32 = 10;

/// Lines per level in marathon mode
pub const MARATHON_LINES_PER_LEVEL: u32 = 15;

/// Maximum number of entries kept in the high-score table
pub const HIGH_SCORE_LIMIT: usize = 10;


/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Position in [`PieceKind::ALL`].
    pub const fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Color/type tag written into board cells (1..=7, 0 is reserved for empty)
    pub const fn id(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states, in 90° clockwise steps from the spawn orientation
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation state as 0..=3 (0°, 90°, 180°, 270°)
    pub const fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Game modes
///
/// - **Classic**: level up every 10 lines, ends when a spawn is blocked
/// - **Sprint**: fixed speed, completes at 40 lines
/// - **Marathon**: level up every 15 lines up to level 15
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GameMode {
    #[default]
    Classic,
    Sprint,
    Marathon,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Classic, GameMode::Sprint, GameMode::Marathon];

    /// Parse mode from string (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "sprint" => Some(GameMode::Sprint),
            "marathon" => Some(GameMode::Marathon),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Sprint => "sprint",
            GameMode::Marathon => "marathon",
        }
    }

    /// Human-readable name for menus and score tables
    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Sprint => "Sprint (40 lines)",
            GameMode::Marathon => "Marathon",
        }
    }
}

/// Discrete input events forwarded to a running game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (1 point per cell)
    SoftDrop,
    /// Instantly drop piece to lowest valid position (2 points per cell)
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Hold current piece (if available)
    Hold,
    /// Toggle pause state
    Pause,
}

impl GameAction {
    pub const ALL: [GameAction; 7] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::Rotate,
        GameAction::Hold,
        GameAction::Pause,
    ];
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Line clear scoring table, indexed by lines cleared and multiplied by level
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Combo bonus per consecutive clearing lock
pub const COMBO_BASE: u32 = 50;

/// Upper bound on the combo bonus of a single lock
pub const COMBO_CAP: u32 = 200;

/// Back-to-back bonus numerator (3/2 = 1.5x multiplier)
pub const B2B_NUMERATOR: u32 = 3;

/// Back-to-back bonus denominator
pub const B2B_DENOMINATOR: u32 = 2;

/// Points per cell for a soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell for a hard drop
pub const HARD_DROP_POINTS: u32 = 2;
