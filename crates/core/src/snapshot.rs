//! Read-only, copyable view of a game for presentation and tooling.

use crate::piece::Piece;
use crate::session::SessionState;
use crate::types::{GameMode, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimersSnapshot {
    pub fall_ms: u32,
    pub lock_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Piece ids per cell (0 = empty)
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub mode: GameMode,
    pub state: SessionState,
    pub episode_id: u32,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub combo: u32,
    pub back_to_back: u32,
    pub elapsed_ms: u64,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Playing && self.active.is_some()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            held: None,
            can_hold: true,
            mode: GameMode::default(),
            state: SessionState::Menu,
            episode_id: 0,
            score: 0,
            lines: 0,
            level: 1,
            combo: 0,
            back_to_back: 0,
            elapsed_ms: 0,
            timers: TimersSnapshot::default(),
        }
    }
}
