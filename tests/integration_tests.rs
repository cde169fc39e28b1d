//! Integration tests for the engine: drops, locking, scoring and mode rules

use blockfall::core::{Game, GameOutcome, Piece, PieceGenerator, SessionState};
use blockfall::types::{GameAction, GameMode, PieceKind, BOARD_WIDTH, LOCK_DELAY_MS};

fn scripted(mode: GameMode, kinds: &[PieceKind]) -> Game {
    Game::new(mode, PieceGenerator::scripted(kinds.to_vec()))
}

/// Fill `row` everywhere except columns `gap_start..gap_start + gap_len`.
fn fill_row_with_gap(game: &mut Game, row: i8, gap_start: i8, gap_len: i8) {
    for x in 0..BOARD_WIDTH as i8 {
        if !(gap_start..gap_start + gap_len).contains(&x) {
            game.board_mut().set(x, row, Some(PieceKind::Z));
        }
    }
}

#[test]
fn test_game_lifecycle() {
    let mut game = Game::new(GameMode::Classic, PieceGenerator::uniform(Some(12345)));

    assert!(game.active().is_some());
    assert!(!game.is_finished());
    assert_eq!(game.level(), 1);
    assert_eq!(game.fall_interval_ms(), 1000);

    // Same seed, same opening.
    let twin = Game::new(GameMode::Classic, PieceGenerator::uniform(Some(12345)));
    assert_eq!(game.active(), twin.active());
    assert_eq!(game.next(), twin.next());

    game.hard_drop();
    assert!(game.active().is_some());
}

#[test]
fn test_game_actions() {
    let mut game = scripted(GameMode::Classic, &[PieceKind::T]);
    let start = game.active().unwrap();

    assert!(game.apply_action(GameAction::MoveLeft));
    assert_eq!(game.active().unwrap().x, start.x - 1);
    assert!(game.apply_action(GameAction::Rotate));
    assert!(game.apply_action(GameAction::SoftDrop));
    assert_eq!(game.active().unwrap().y, start.y + 1);
    assert_eq!(game.score(), 1);
    assert!(!game.apply_action(GameAction::Pause));
}

#[test]
fn test_i_hard_drop_on_empty_board() {
    let mut game = scripted(GameMode::Classic, &[PieceKind::I, PieceKind::T]);

    assert_eq!(game.hard_drop(), 19);

    assert_eq!(game.score(), 2 * 19);
    for x in 4..8 {
        assert_eq!(game.board().get(x, 19), Some(Some(PieceKind::I)));
    }
    assert_eq!(game.active().map(|p| p.kind), Some(PieceKind::T));
    assert!(game.can_hold());
}

#[test]
fn test_ghost_matches_hard_drop() {
    let mut game = scripted(GameMode::Classic, &[PieceKind::J, PieceKind::S]);
    game.board_mut().set(5, 12, Some(PieceKind::O));
    let ghost = game.ghost_y().unwrap();
    let before = game.active().unwrap();

    game.hard_drop();

    assert_eq!(game.board().get(before.x, ghost), Some(Some(PieceKind::J)));
    assert_eq!(ghost, 10);
}

#[test]
fn test_combo_counts_and_resets() {
    let mut game = scripted(GameMode::Classic, &[PieceKind::I]);
    fill_row_with_gap(&mut game, 19, 0, 4);
    fill_row_with_gap(&mut game, 18, 0, 4);

    // First clear.
    game.try_move(-4, 0);
    game.hard_drop();
    assert_eq!(game.lines(), 1);
    assert_eq!(game.combo(), 1);

    // Second consecutive clear.
    game.try_move(-4, 0);
    game.hard_drop();
    assert_eq!(game.lines(), 2);
    assert_eq!(game.combo(), 2);

    // A lock that clears nothing resets the chain.
    game.hard_drop();
    assert_eq!(game.combo(), 0);
    assert_eq!(game.lines(), 2);
}

#[test]
fn test_back_to_back_tetris_scoring() {
    let mut game = scripted(GameMode::Classic, &[PieceKind::I]);
    for row in 12..20 {
        fill_row_with_gap(&mut game, row, 0, 1);
    }

    let vertical_i_to_wall = |game: &mut Game| {
        assert!(game.rotate());
        while game.move_left() {}
        game.hard_drop()
    };

    let drop1 = vertical_i_to_wall(&mut game);
    assert_eq!(game.lines(), 4);
    assert_eq!(game.back_to_back(), 1);
    let after_first = game.score();
    // 800 * level 1, combo 1 bonus.
    assert_eq!(after_first, 2 * drop1 + 800 + 50);

    let drop2 = vertical_i_to_wall(&mut game);
    assert_eq!(game.lines(), 8);
    assert_eq!(game.back_to_back(), 2);
    // Still level 1 when scored: 800 * 3/2, combo 2 bonus.
    assert_eq!(game.score() - after_first, 2 * drop2 + 1200 + 100);
    assert_eq!(game.level(), 1);
}

#[test]
fn test_level_uses_old_value_when_scoring() {
    let mut game = scripted(GameMode::Classic, &[PieceKind::I]);
    // Nine lines already on the counter via single clears.
    for _ in 0..9 {
        fill_row_with_gap(&mut game, 19, 0, 4);
        game.try_move(-4, 0);
        game.hard_drop();
    }
    assert_eq!(game.lines(), 9);
    assert_eq!(game.level(), 1);

    fill_row_with_gap(&mut game, 19, 0, 4);
    game.try_move(-4, 0);
    let before = game.score();
    let drop = game.hard_drop();

    assert_eq!(game.lines(), 10);
    assert_eq!(game.level(), 2);
    // Base at level 1; combo is on its tenth link and capped.
    assert_eq!(game.score() - before, 2 * drop + 100 + 200);
    assert_eq!(game.fall_interval_ms(), 940);
}

#[test]
fn test_sprint_completes_at_forty_lines() {
    let mut game = scripted(GameMode::Sprint, &[PieceKind::I]);
    // Every I completes a single line, so the spawn area stays free.
    for _ in 0..40 {
        fill_row_with_gap(&mut game, 19, 0, 4);
        game.try_move(-4, 0);
        game.hard_drop();
        if game.is_finished() {
            break;
        }
        assert_eq!(game.level(), 1);
        assert_eq!(game.fall_interval_ms(), 500);
    }

    assert_eq!(game.lines(), 40);
    assert_eq!(game.outcome(), Some(GameOutcome::Completed));
    assert!(game.active().is_none());
    assert_eq!(game.snapshot().state, SessionState::GameOver);

    let result = game.result().unwrap();
    assert_eq!(result.mode, GameMode::Sprint);
    assert_eq!(result.lines_cleared, 40);
    assert!(!result.date.is_empty());
}

#[test]
fn test_sprint_completion_wins_over_blocked_spawn() {
    // Forty I pieces for the clears, then an O waiting in the queue.
    let mut kinds = vec![PieceKind::I; 40];
    kinds.push(PieceKind::O);
    let mut game = scripted(GameMode::Sprint, &kinds);

    for _ in 0..39 {
        fill_row_with_gap(&mut game, 19, 0, 4);
        game.try_move(-4, 0);
        game.hard_drop();
    }
    assert_eq!(game.lines(), 39);
    assert!(!game.is_finished());

    fill_row_with_gap(&mut game, 19, 0, 4);
    game.try_move(-4, 0);
    // Slides down to (4, 1) when row 19 clears, inside the O's spawn cells.
    game.board_mut().set(4, 0, Some(PieceKind::Z));
    game.hard_drop();

    assert_eq!(game.lines(), 40);
    assert_eq!(game.board().get(4, 1), Some(Some(PieceKind::Z)));
    assert!(!game
        .board()
        .is_valid_position(&Piece::spawn(game.next()), 0, 0, None));
    assert_eq!(game.next(), PieceKind::O);
    assert_eq!(game.outcome(), Some(GameOutcome::Completed));
    assert!(game.active().is_none());
}

#[test]
fn test_marathon_level_caps() {
    let mut game = scripted(GameMode::Marathon, &[PieceKind::I]);
    for _ in 0..15 {
        fill_row_with_gap(&mut game, 19, 0, 4);
        game.try_move(-4, 0);
        game.hard_drop();
    }
    assert_eq!(game.level(), 2);
    assert!(!game.is_finished());
}

#[test]
fn test_second_hold_is_rejected() {
    let mut game = scripted(GameMode::Classic, &[PieceKind::S, PieceKind::Z, PieceKind::L]);

    assert!(game.hold());
    let active = game.active();
    let held = game.held();

    assert!(!game.hold());
    assert_eq!(game.active(), active);
    assert_eq!(game.held(), held);

    // A lock re-enables hold.
    game.hard_drop();
    assert!(game.can_hold());
    assert!(game.hold());
    assert_eq!(game.held(), Some(PieceKind::L));
    assert_eq!(game.active().map(|p| p.kind), Some(PieceKind::S));
}

#[test]
fn test_lock_delay_after_landing() {
    let mut game = scripted(GameMode::Classic, &[PieceKind::T, PieceKind::I]);
    while game.can_fall() {
        game.soft_drop();
    }

    // Sliding along the floor is allowed until the delay runs out.
    game.update(LOCK_DELAY_MS / 2);
    assert!(game.move_left());
    assert!(!game.lock_delay_expired());

    game.update(LOCK_DELAY_MS / 2);
    assert_eq!(game.active().map(|p| p.kind), Some(PieceKind::I));
    assert_eq!(game.board().get(3, 19), Some(Some(PieceKind::T)));
}

#[test]
fn test_finished_game_ignores_everything() {
    let mut game = scripted(GameMode::Classic, &[PieceKind::O]);
    game.board_mut().set(4, 2, Some(PieceKind::J));
    game.hard_drop();
    assert_eq!(game.outcome(), Some(GameOutcome::ToppedOut));

    let score = game.score();
    let elapsed = game.elapsed_ms();
    for action in GameAction::ALL {
        assert!(!game.apply_action(action));
    }
    assert!(!game.update(10_000));
    assert_eq!(game.score(), score);
    assert_eq!(game.elapsed_ms(), elapsed);
}
