//! Mode policy - level progression, gravity and end conditions per game mode
//!
//! | Mode | Level | Fall interval (ms/cell) | Ends |
//! |------|-------|-------------------------|------|
//! | Classic | `lines / 10 + 1` | `max(50, 1000 - (level - 1) * 60)` | blocked spawn |
//! | Sprint | 1 | 500 | 40 lines (success) or blocked spawn |
//! | Marathon | `min(15, lines / 15 + 1)` | `max(50, 1000 - (level - 1) * 60)` | blocked spawn |

use crate::types::{
    GameMode, BASE_FALL_MS, CLASSIC_LINES_PER_LEVEL, FALL_STEP_MS, MARATHON_LINES_PER_LEVEL,
    MARATHON_MAX_LEVEL, MIN_FALL_MS, SPRINT_FALL_MS, SPRINT_TARGET_LINES,
};

/// Level reached after `lines` total cleared lines
pub fn level_for(mode: GameMode, lines: u32) -> u32 {
    match mode {
        GameMode::Classic => lines / CLASSIC_LINES_PER_LEVEL + 1,
        GameMode::Sprint => 1,
        GameMode::Marathon => (lines / MARATHON_LINES_PER_LEVEL + 1).min(MARATHON_MAX_LEVEL),
    }
}

/// Gravity interval in milliseconds per cell
pub fn fall_interval_ms(mode: GameMode, level: u32) -> u32 {
    match mode {
        GameMode::Sprint => SPRINT_FALL_MS,
        GameMode::Classic | GameMode::Marathon => {
            let speedup = level.saturating_sub(1).saturating_mul(FALL_STEP_MS);
            BASE_FALL_MS.saturating_sub(speedup).max(MIN_FALL_MS)
        }
    }
}

/// Whether the mode's goal has been reached (a successful finish)
pub fn is_complete(mode: GameMode, lines: u32) -> bool {
    match mode {
        GameMode::Sprint => lines >= SPRINT_TARGET_LINES,
        GameMode::Classic | GameMode::Marathon => false,
    }
}
