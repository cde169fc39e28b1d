//! Automatic play for headless sessions, demos and benches
//!
//! - [`place`]: turn a target placement into input actions
//! - [`features`]: stack features (heights, holes, bumpiness)
//! - [`policy`]: pick a placement; [`HeuristicPolicy`] ranks every candidate

pub mod features;
pub mod place;
pub mod policy;

pub use features::{compute_grid_features, GridFeatures};
pub use place::{apply_place, plan_place, PlaceError, Placement};
pub use policy::{HeuristicPolicy, Policy};

use blockfall_core::{Session, SessionState};
use blockfall_types::GameAction;
use tracing::trace;

/// Drives a session with a policy, one placement per step
#[derive(Debug, Clone, Default)]
pub struct Autoplayer<P> {
    policy: P,
    placed: u64,
}

impl<P: Policy> Autoplayer<P> {
    pub fn new(policy: P) -> Self {
        Self { policy, placed: 0 }
    }

    /// Pieces placed so far
    pub fn placed(&self) -> u64 {
        self.placed
    }

    /// Place the active piece if the session is playing
    ///
    /// Returns `Ok(false)` when there was nothing to do. When the policy finds
    /// no legal placement the piece is hard dropped where it is.
    pub fn step(&mut self, session: &mut Session) -> Result<bool, PlaceError> {
        if session.state() != SessionState::Playing {
            return Ok(false);
        }
        let Some(game) = session.game() else {
            return Ok(false);
        };
        if game.active().is_none() {
            return Ok(false);
        }

        match self.policy.choose(game) {
            Some(placement) => {
                trace!(?placement, "placing");
                apply_place(session, placement)?;
            }
            None => {
                session.apply_action(GameAction::HardDrop);
            }
        }

        self.placed += 1;
        Ok(true)
    }
}
