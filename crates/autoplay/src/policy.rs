//! Placement policies.
//!
//! The heuristic policy tries every hold choice, rotation and column on a copy
//! of the game, hard drops, and keeps the placement with the best weighted
//! score over the resulting stack.

use blockfall_core::{Game, GameOutcome};
use blockfall_types::{Rotation, BOARD_WIDTH};

use crate::features::compute_grid_features;
use crate::place::{plan_place, Placement};

/// Chooses a placement for the current state, or `None` if nothing is legal.
///
/// Object-safe so it can be used as `Box<dyn Policy>`.
pub trait Policy {
    fn choose(&mut self, game: &Game) -> Option<Placement>;
}

/// Feature weights from the classic hand-tuned line-clearing agent
#[derive(Clone, Copy, Debug, PartialEq)]
struct HeuristicWeights {
    agg_height: f64,
    complete_lines: f64,
    holes: f64,
    bumpiness: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            agg_height: -0.510066,
            complete_lines: 0.760666,
            holes: -0.35663,
            bumpiness: -0.184483,
        }
    }
}

const TOP_OUT_PENALTY: f64 = -1.0e9;
const COMPLETION_BONUS: f64 = 1.0e9;

#[derive(Clone, Debug, Default)]
pub struct HeuristicPolicy {
    weights: HeuristicWeights,
}

impl HeuristicPolicy {
    /// Score of the game after a placement has been carried out
    fn evaluate(&self, after: &mut Game) -> f64 {
        match after.outcome() {
            Some(GameOutcome::ToppedOut) => return TOP_OUT_PENALTY,
            Some(GameOutcome::Completed) => return COMPLETION_BONUS,
            None => {}
        }

        let lines = after
            .take_last_event()
            .map_or(0, |event| event.cleared_rows.len());
        let f = compute_grid_features(after.board());
        let w = &self.weights;

        w.agg_height * f64::from(f.agg_h)
            + w.complete_lines * lines as f64
            + w.holes * f64::from(f.holes)
            + w.bumpiness * f64::from(f.bump)
    }
}

impl Policy for HeuristicPolicy {
    fn choose(&mut self, game: &Game) -> Option<Placement> {
        if game.is_finished() || game.active().is_none() {
            return None;
        }

        let mut best: Option<(f64, Placement)> = None;

        for use_hold in [false, true] {
            if use_hold && !game.can_hold() {
                continue;
            }

            for rotation in Rotation::ALL {
                for x in 0..BOARD_WIDTH as i8 {
                    let placement = Placement {
                        x,
                        rotation,
                        use_hold,
                    };
                    let mut sim = game.clone();
                    if plan_place(&mut sim, placement).is_err() {
                        continue;
                    }

                    let score = self.evaluate(&mut sim);
                    if best.map_or(true, |(b, _)| score > b) {
                        best = Some((score, placement));
                    }
                }
            }
        }

        best.map(|(_, placement)| placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::PieceGenerator;
    use blockfall_types::{GameMode, PieceKind};

    #[test]
    fn prefers_the_line_clear() {
        let mut game = Game::new(GameMode::Classic, PieceGenerator::scripted([PieceKind::I]));
        for x in 4..10 {
            game.board_mut().set(x, 19, Some(PieceKind::L));
        }

        let placement = HeuristicPolicy::default().choose(&game).unwrap();
        assert_eq!(
            placement,
            Placement {
                x: 0,
                rotation: Rotation::North,
                use_hold: false,
            }
        );
    }

    #[test]
    fn avoids_covering_a_hole() {
        let mut game = Game::new(GameMode::Classic, PieceGenerator::scripted([PieceKind::O]));
        // A one-wide well at column 0; any O over it would seal a hole.
        for x in 1..10 {
            game.board_mut().set(x, 19, Some(PieceKind::J));
        }

        let placement = HeuristicPolicy::default().choose(&game).unwrap();
        assert!(placement.x >= 1);
    }

    #[test]
    fn finished_game_has_no_choice() {
        let mut game = Game::new(GameMode::Classic, PieceGenerator::scripted([PieceKind::O]));
        game.board_mut().set(4, 2, Some(PieceKind::J));
        game.hard_drop();
        assert!(game.is_finished());
        assert!(HeuristicPolicy::default().choose(&game).is_none());
    }

    #[test]
    fn policy_is_object_safe() {
        let mut policy: Box<dyn Policy> = Box::new(HeuristicPolicy::default());
        let game = Game::new(GameMode::Sprint, PieceGenerator::uniform(Some(1)));
        assert!(policy.choose(&game).is_some());
    }
}
