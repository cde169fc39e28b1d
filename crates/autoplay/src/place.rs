//! Placement: steer the active piece to a target column and rotation, then hard drop.

use thiserror::Error;

use blockfall_core::{Game, Session, SessionState};
use blockfall_types::{GameAction, Rotation, BOARD_WIDTH};

/// Where to put the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Anchor column after rotation
    pub x: i8,
    pub rotation: Rotation,
    /// Swap with the hold slot before placing
    pub use_hold: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("hold requested when unavailable")]
    HoldUnavailable,
    #[error("could not rotate to target rotation")]
    RotationBlocked,
    #[error("target x would place piece out of bounds")]
    XOutOfBounds,
    #[error("could not move to target x due to collision")]
    XBlocked,
    #[error("game is not playable")]
    NotPlayable,
    #[error("no active piece")]
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::HoldUnavailable => "hold_unavailable",
            PlaceError::RotationBlocked
            | PlaceError::XOutOfBounds
            | PlaceError::XBlocked
            | PlaceError::NotPlayable
            | PlaceError::NoActive => "invalid_place",
        }
    }
}

/// Carry out `placement` on `game`, returning the actions that did it
///
/// Rotation is clockwise only, so reaching West from North takes three turns.
/// Kicks may shift the piece while rotating; the column is corrected afterwards.
pub fn plan_place(game: &mut Game, placement: Placement) -> Result<Vec<GameAction>, PlaceError> {
    if game.is_finished() {
        return Err(PlaceError::NotPlayable);
    }

    let mut actions = Vec::new();

    // Hold first if requested.
    if placement.use_hold {
        if !game.hold() {
            return Err(PlaceError::HoldUnavailable);
        }
        actions.push(GameAction::Hold);
    }

    let Some(active0) = game.active() else {
        return Err(PlaceError::NoActive);
    };

    let steps = (placement.rotation.index() + 4 - active0.rotation.index()) % 4;
    for _ in 0..steps {
        if !game.rotate() {
            return Err(PlaceError::RotationBlocked);
        }
        actions.push(GameAction::Rotate);
    }

    let Some(active) = game.active() else {
        return Err(PlaceError::NoActive);
    };
    if active.rotation != placement.rotation {
        return Err(PlaceError::RotationBlocked);
    }

    let width = active.shape().width as i8;
    if placement.x < 0 || placement.x + width > BOARD_WIDTH as i8 {
        return Err(PlaceError::XOutOfBounds);
    }

    let dx = placement.x - active.x;
    let (step, action) = if dx > 0 {
        (1, GameAction::MoveRight)
    } else {
        (-1, GameAction::MoveLeft)
    };
    for _ in 0..dx.unsigned_abs() {
        if !game.try_move(step, 0) {
            return Err(PlaceError::XBlocked);
        }
        actions.push(action);
    }

    game.hard_drop();
    actions.push(GameAction::HardDrop);

    Ok(actions)
}

/// Plan on a copy of the session's game, then replay the actions for real.
pub fn apply_place(session: &mut Session, placement: Placement) -> Result<(), PlaceError> {
    if session.state() != SessionState::Playing {
        return Err(PlaceError::NotPlayable);
    }
    let Some(game) = session.game() else {
        return Err(PlaceError::NoActive);
    };

    let mut sim = game.clone();
    let actions = plan_place(&mut sim, placement)?;
    for action in actions {
        session.apply_action(action);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::{HighScores, PieceGenerator, SessionConfig};
    use blockfall_types::{GameMode, PieceKind};

    fn game(kinds: &[PieceKind]) -> Game {
        Game::new(GameMode::Classic, PieceGenerator::scripted(kinds.to_vec()))
    }

    fn at(x: i8, rotation: Rotation) -> Placement {
        Placement {
            x,
            rotation,
            use_hold: false,
        }
    }

    #[test]
    fn place_rejected_when_paused() {
        let mut session = Session::new(SessionConfig::default(), HighScores::in_memory());
        session.start(GameMode::Classic);
        assert!(session.apply_action(GameAction::Pause));

        let err = apply_place(&mut session, at(0, Rotation::North)).unwrap_err();
        assert_eq!(err, PlaceError::NotPlayable);
        assert_eq!(err.code(), "invalid_place");
    }

    #[test]
    fn place_rejected_when_x_out_of_bounds() {
        let mut g = game(&[PieceKind::T]);
        assert_eq!(
            plan_place(&mut g, at(-50, Rotation::North)),
            Err(PlaceError::XOutOfBounds)
        );
        assert_eq!(
            plan_place(&mut g, at(8, Rotation::North)),
            Err(PlaceError::XOutOfBounds)
        );
    }

    #[test]
    fn place_rejected_when_x_blocked_by_collision() {
        let mut g = game(&[PieceKind::T]);
        let a = g.active().unwrap();

        // Block exactly the cells the piece would cover one column to the left.
        for (x, y) in a.moved(-1, 0).cells() {
            g.board_mut().set(x, y, Some(PieceKind::I));
        }

        assert_eq!(
            plan_place(&mut g, at(a.x - 1, a.rotation)),
            Err(PlaceError::XBlocked)
        );
    }

    #[test]
    fn place_rejects_second_hold() {
        let mut g = game(&[PieceKind::T, PieceKind::S]);
        assert!(g.hold());
        let placement = Placement {
            use_hold: true,
            ..at(0, Rotation::North)
        };
        assert_eq!(plan_place(&mut g, placement), Err(PlaceError::HoldUnavailable));
    }

    #[test]
    fn o_piece_cannot_target_other_rotations() {
        let mut g = game(&[PieceKind::O]);
        assert_eq!(
            plan_place(&mut g, at(0, Rotation::East)),
            Err(PlaceError::RotationBlocked)
        );
    }

    #[test]
    fn plan_records_actions_in_order() {
        let mut g = game(&[PieceKind::I, PieceKind::O]);
        let actions = plan_place(&mut g, at(9, Rotation::East)).unwrap();

        assert_eq!(actions[0], GameAction::Rotate);
        assert_eq!(actions.last(), Some(&GameAction::HardDrop));
        for y in 16..20 {
            assert_eq!(g.board().get(9, y), Some(Some(PieceKind::I)));
        }
        assert_eq!(g.active().map(|p| p.kind), Some(PieceKind::O));
    }

    #[test]
    fn apply_place_replays_on_session() {
        let config = SessionConfig {
            seed: Some(3),
            ..SessionConfig::default()
        };
        let mut session = Session::new(config, HighScores::in_memory());
        session.start_with_generator(GameMode::Classic, PieceGenerator::scripted([PieceKind::O]));

        apply_place(&mut session, at(0, Rotation::North)).unwrap();

        let game = session.game().unwrap();
        assert_eq!(game.board().get(0, 19), Some(Some(PieceKind::O)));
        assert_eq!(game.board().get(1, 18), Some(Some(PieceKind::O)));
    }
}
