//! Session module - the state machine around a game
//!
//! ```text
//! Menu -> Playing (start)          Menu -> HighScores (view)
//! HighScores -> Menu (back)        Playing <-> Paused (toggle)
//! Playing -> GameOver (topped out or goal reached)
//! GameOver -> Playing (restart)    GameOver -> Menu (back)
//! ```
//!
//! `Playing` is the only state in which time advances the game or movement
//! input reaches it. Leaving the game for the menu discards it.

use tracing::debug;

use crate::config::SessionConfig;
use crate::game::{Game, GameResult};
use crate::highscores::{HighScoreEntry, HighScores};
use crate::rng::PieceGenerator;
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, GameMode};

/// The single authoritative session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
    HighScores,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Menu => "menu",
            SessionState::Playing => "playing",
            SessionState::Paused => "paused",
            SessionState::GameOver => "game_over",
            SessionState::HighScores => "high_scores",
        }
    }
}

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    state: SessionState,
    mode: GameMode,
    game: Option<Game>,
    high_scores: HighScores,
    episode_id: u32,
    result: Option<GameResult>,
    last_rank: Option<usize>,
}

impl Session {
    pub fn new(config: SessionConfig, high_scores: HighScores) -> Self {
        Self {
            config,
            state: SessionState::Menu,
            mode: GameMode::default(),
            game: None,
            high_scores,
            episode_id: 0,
            result: None,
            last_rank: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Mode of the current (or last) game
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Number of games started so far
    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Rank of the last finished game in the high-score table, if it entered
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    /// Take the final result of the last finished game
    pub fn take_result(&mut self) -> Option<GameResult> {
        self.result.take()
    }

    fn transition(&mut self, to: SessionState) {
        debug!(from = self.state.as_str(), to = to.as_str(), "session state");
        self.state = to;
    }

    fn generator(&self) -> PieceGenerator {
        let seed = self
            .config
            .seed
            .map(|seed| seed.wrapping_add(u64::from(self.episode_id)));
        PieceGenerator::uniform(seed)
    }

    /// Start a new game in `mode`
    ///
    /// Allowed from every state except `HighScores`; from `Playing` or
    /// `Paused` it abandons the current game without a result.
    pub fn start(&mut self, mode: GameMode) -> bool {
        let generator = self.generator();
        self.start_with_generator(mode, generator)
    }

    /// Start a game with an explicit piece generator
    pub fn start_with_generator(&mut self, mode: GameMode, generator: PieceGenerator) -> bool {
        if self.state == SessionState::HighScores {
            return false;
        }

        self.mode = mode;
        self.game = Some(Game::new(mode, generator).with_lock_delay_ms(self.config.lock_delay_ms));
        self.episode_id = self.episode_id.wrapping_add(1);
        self.result = None;
        self.last_rank = None;
        debug!(mode = mode.as_str(), episode = self.episode_id, "game started");
        self.transition(SessionState::Playing);
        true
    }

    /// Explicit reset: same as starting over in `mode`
    pub fn reset(&mut self, mode: GameMode) -> bool {
        self.start(mode)
    }

    /// Play the last mode again after a game over
    pub fn restart(&mut self) -> bool {
        if self.state != SessionState::GameOver {
            return false;
        }
        self.start(self.mode)
    }

    pub fn view_high_scores(&mut self) -> bool {
        if self.state != SessionState::Menu {
            return false;
        }
        self.transition(SessionState::HighScores);
        true
    }

    /// Return to the menu, discarding any game in progress
    pub fn back_to_menu(&mut self) -> bool {
        if self.state == SessionState::Menu {
            return false;
        }
        self.game = None;
        self.transition(SessionState::Menu);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            SessionState::Playing => self.transition(SessionState::Paused),
            SessionState::Paused => self.transition(SessionState::Playing),
            _ => return false,
        }
        true
    }

    /// Advance the game by `elapsed_ms`; ignored outside `Playing`
    pub fn update(&mut self, elapsed_ms: u32) -> bool {
        self.play(|game| game.update(elapsed_ms))
    }

    /// Route a discrete input event
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => self.toggle_pause(),
            _ => self.play(|game| game.apply_action(action)),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.play(Game::move_left)
    }

    pub fn move_right(&mut self) -> bool {
        self.play(Game::move_right)
    }

    pub fn soft_drop(&mut self) -> bool {
        self.play(Game::soft_drop)
    }

    pub fn rotate(&mut self) -> bool {
        self.play(Game::rotate)
    }

    pub fn hard_drop(&mut self) -> bool {
        self.apply_action(GameAction::HardDrop)
    }

    pub fn hold(&mut self) -> bool {
        self.play(Game::hold)
    }

    fn play(&mut self, op: impl FnOnce(&mut Game) -> bool) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        let Some(game) = self.game.as_mut() else {
            return false;
        };

        let changed = op(game);
        if game.is_finished() {
            self.finish_game();
        }
        changed
    }

    fn finish_game(&mut self) {
        let Some(result) = self.game.as_ref().and_then(Game::result) else {
            return;
        };

        if self.high_scores.qualifies(result.score) {
            let entry = HighScoreEntry::from_result(self.config.player_name.clone(), &result);
            self.last_rank = self.high_scores.record(entry);
        }

        self.result = Some(result);
        self.transition(SessionState::GameOver);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        match &self.game {
            Some(game) => game.snapshot_into(out),
            None => {
                out.clear();
                out.mode = self.mode;
            }
        }
        out.state = self.state;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
