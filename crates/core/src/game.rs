//! Game module - the engine driving one play session
//!
//! Ties together board, pieces, the piece generator, scoring and the mode policy.
//! It handles gravity and lock-delay timing, movement, rotation with wall kicks,
//! hold, hard drop, line clears and the end of the game.
//!
//! All timing is driven by the caller through [`Game::update`]; nothing here
//! sleeps or spawns. Once the game has an outcome every operation is a no-op.

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, ClearedRows};
use crate::mode;
use crate::piece::Piece;
use crate::pieces::try_rotate;
use crate::rng::PieceGenerator;
use crate::scoring::{calculate_drop_score, calculate_score, ScoreResult};
use crate::session::SessionState;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::types::{GameAction, GameMode, PieceKind, LOCK_DELAY_MS};

/// Timestamp format used in result records
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    /// A new piece could not be placed at its spawn position
    ToppedOut,
    /// The mode's goal was reached (sprint: 40 lines)
    Completed,
}

/// Final summary of a finished game, handed to the high-score collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub score: u32,
    pub mode: GameMode,
    pub lines_cleared: u32,
    pub level: u32,
    pub elapsed_ms: u64,
    pub outcome: GameOutcome,
    pub date: String,
}

/// Emitted after every lock (consumed by observers)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub cleared_rows: ClearedRows,
    pub score: ScoreResult,
}

/// Complete engine state for one game
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active: Option<Piece>,
    next: PieceKind,
    held: Option<PieceKind>,
    can_hold: bool,
    generator: PieceGenerator,
    mode: GameMode,
    score: u32,
    lines: u32,
    level: u32,
    combo: u32,
    back_to_back: u32,
    fall_timer_ms: u32,
    lock_timer_ms: u32,
    lock_delay_ms: u32,
    elapsed_ms: u64,
    outcome: Option<GameOutcome>,
    finished_at: Option<String>,
    last_event: Option<LockEvent>,
}

impl Game {
    /// Create a game and spawn its first piece
    pub fn new(mode: GameMode, mut generator: PieceGenerator) -> Self {
        let first = generator.next_kind();
        let next = generator.next_kind();

        Self {
            board: Board::new(),
            active: Some(Piece::spawn(first)),
            next,
            held: None,
            can_hold: true,
            generator,
            mode,
            score: 0,
            lines: 0,
            level: mode::level_for(mode, 0),
            combo: 0,
            back_to_back: 0,
            fall_timer_ms: 0,
            lock_timer_ms: 0,
            lock_delay_ms: LOCK_DELAY_MS,
            elapsed_ms: 0,
            outcome: None,
            finished_at: None,
            last_event: None,
        }
    }

    pub fn with_lock_delay_ms(mut self, lock_delay_ms: u32) -> Self {
        self.lock_delay_ms = lock_delay_ms;
        self
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for tests and tooling that need a prepared stack
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn back_to_back(&self) -> u32 {
        self.back_to_back
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn fall_timer_ms(&self) -> u32 {
        self.fall_timer_ms
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    pub fn lock_delay_ms(&self) -> u32 {
        self.lock_delay_ms
    }

    /// Current gravity interval from the mode policy
    pub fn fall_interval_ms(&self) -> u32 {
        mode::fall_interval_ms(self.mode, self.level)
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// The final summary, once the game has ended
    pub fn result(&self) -> Option<GameResult> {
        let outcome = self.outcome?;
        Some(GameResult {
            score: self.score,
            mode: self.mode,
            lines_cleared: self.lines,
            level: self.level,
            elapsed_ms: self.elapsed_ms,
            outcome,
            date: self.finished_at.clone().unwrap_or_default(),
        })
    }

    fn playable_piece(&self) -> Option<Piece> {
        if self.outcome.is_some() {
            return None;
        }
        self.active
    }

    /// Whether the active piece can move one row down
    pub fn can_fall(&self) -> bool {
        self.playable_piece()
            .is_some_and(|p| self.board.is_valid_position(&p, 0, 1, None))
    }

    /// Whether a grounded piece has used up its lock delay
    pub fn lock_delay_expired(&self) -> bool {
        self.lock_timer_ms >= self.lock_delay_ms
    }

    /// Try to move the active piece
    ///
    /// A successful downward move resets the lock timer. A blocked downward
    /// move whose lock delay has run out locks the piece and reports `true`.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.playable_piece() else {
            return false;
        };

        if self.board.is_valid_position(&active, dx, dy, None) {
            self.active = Some(active.moved(dx, dy));
            if dy > 0 {
                self.lock_timer_ms = 0;
            }
            return true;
        }

        if dy > 0 && self.lock_delay_expired() {
            self.lock_piece();
            return true;
        }

        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move down one row, scoring a point when the piece actually descends
    pub fn soft_drop(&mut self) -> bool {
        let descends = self.can_fall();
        let moved = self.try_move(0, 1);
        if moved && descends {
            self.score = self.score.saturating_add(calculate_drop_score(1, false));
        }
        moved
    }

    /// Rotate the active piece clockwise, trying wall kicks if needed
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.playable_piece() else {
            return false;
        };

        let board = &self.board;
        let result = try_rotate(active.kind, active.rotation, |shape, dx, dy| {
            board.is_valid_position(&active, dx, dy, Some(shape))
        });

        match result {
            Some((rotation, (dx, dy))) => {
                self.active = Some(Piece {
                    rotation,
                    ..active.moved(dx, dy)
                });
                true
            }
            None => false,
        }
    }

    /// Drop the active piece to its resting row and lock it immediately
    ///
    /// Returns the number of rows descended (2 points each).
    pub fn hard_drop(&mut self) -> u32 {
        let Some(mut piece) = self.playable_piece() else {
            return 0;
        };

        let mut distance: u32 = 0;
        while self.board.is_valid_position(&piece, 0, 1, None) {
            piece = piece.moved(0, 1);
            distance += 1;
        }

        self.active = Some(piece);
        self.score = self
            .score
            .saturating_add(calculate_drop_score(distance, true));
        self.lock_piece();

        distance
    }

    /// Swap the active piece with the hold slot (once per lock)
    ///
    /// With an empty slot the next piece comes in from the queue; otherwise
    /// the held kind re-enters at its spawn state. Returns false when hold is
    /// unavailable, or when the incoming piece is blocked and the game ends.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.playable_piece() else {
            return false;
        };

        let entered = match self.held.replace(active.kind) {
            Some(held_kind) => self.enter(Piece::spawn(held_kind)),
            None => self.spawn_next(),
        };

        self.can_hold = false;
        self.lock_timer_ms = 0;
        self.fall_timer_ms = 0;
        debug!(held = active.kind.as_str(), "piece held");

        entered
    }

    /// Row the active piece would come to rest on after a hard drop
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;

        let mut drop_distance: i8 = 0;
        while self
            .board
            .is_valid_position(&active, 0, drop_distance + 1, None)
        {
            drop_distance += 1;
        }

        Some(active.y + drop_distance)
    }

    /// Lock the active piece onto the board and handle line clears
    pub fn lock_piece(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.lock(&piece);
        let cleared_rows = self.board.clear_full_rows();
        let lines_cleared = cleared_rows.len();

        // Score with the level in force before this clear.
        self.lines += lines_cleared as u32;
        let result = calculate_score(lines_cleared, self.level, self.combo, self.back_to_back);
        self.score = self.score.saturating_add(result.total);
        self.combo = result.combo;
        self.back_to_back = result.back_to_back;
        self.level = mode::level_for(self.mode, self.lines);

        self.lock_timer_ms = 0;
        self.fall_timer_ms = 0;

        debug!(
            kind = piece.kind.as_str(),
            lines_cleared,
            score = self.score,
            combo = self.combo,
            "piece locked"
        );

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            cleared_rows,
            score: result,
        });

        // Completion wins over a blocked spawn.
        if mode::is_complete(self.mode, self.lines) {
            self.finish(GameOutcome::Completed);
            return;
        }

        self.spawn_next();
    }

    /// Bring the queued piece in and draw a new one behind it
    fn spawn_next(&mut self) -> bool {
        let piece = Piece::spawn(self.next);
        if !self.enter(piece) {
            return false;
        }
        self.next = self.generator.next_kind();
        self.can_hold = true;
        true
    }

    /// Make `piece` active, or end the game if its cells are taken
    fn enter(&mut self, piece: Piece) -> bool {
        if !self.board.is_valid_position(&piece, 0, 0, None) {
            self.active = None;
            self.finish(GameOutcome::ToppedOut);
            return false;
        }
        self.active = Some(piece);
        self.lock_timer_ms = 0;
        true
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.outcome = Some(outcome);
        self.finished_at = Some(Local::now().format(DATE_FORMAT).to_string());
        info!(
            mode = self.mode.as_str(),
            ?outcome,
            score = self.score,
            lines = self.lines,
            level = self.level,
            "game finished"
        );
    }

    /// Advance timers by `elapsed_ms` and apply gravity / lock delay
    ///
    /// Returns true if the piece moved down or locked.
    pub fn update(&mut self, elapsed_ms: u32) -> bool {
        if self.playable_piece().is_none() {
            return false;
        }

        self.elapsed_ms += u64::from(elapsed_ms);

        if !self.can_fall() {
            self.lock_timer_ms = self.lock_timer_ms.saturating_add(elapsed_ms);
            if self.lock_delay_expired() {
                self.lock_piece();
                return true;
            }
            return false;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms >= self.fall_interval_ms() {
            self.fall_timer_ms = 0;
            return self.try_move(0, 1);
        }

        false
    }

    /// Apply a movement action; `Pause` belongs to the session and is ignored
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                let playable = self.playable_piece().is_some();
                self.hard_drop();
                playable
            }
            GameAction::Rotate => self.rotate(),
            GameAction::Hold => self.hold(),
            GameAction::Pause => false,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.held = self.held;
        out.can_hold = self.can_hold;
        out.mode = self.mode;
        out.state = if self.is_finished() {
            SessionState::GameOver
        } else {
            SessionState::Playing
        };
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.combo = self.combo;
        out.back_to_back = self.back_to_back;
        out.elapsed_ms = self.elapsed_ms;
        out.timers = TimersSnapshot {
            fall_ms: self.fall_timer_ms,
            lock_ms: self.lock_timer_ms,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
