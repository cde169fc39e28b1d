//! Scoring module - per-lock score rule
//!
//! Applied once for every lock, including locks that clear nothing:
//! - Base points come from `LINE_SCORES[lines]`, multiplied by the current level.
//! - A 4-line clear extends the back-to-back chain; from the second one in a
//!   row the base points are multiplied by 3/2. Any other lock ends the chain.
//! - A clearing lock extends the combo chain and adds `min(50 * combo, 200)`.
//!   A lock that clears nothing resets the combo.

use crate::types::{
    B2B_DENOMINATOR, B2B_NUMERATOR, COMBO_BASE, COMBO_CAP, HARD_DROP_POINTS, LINE_SCORES,
    SOFT_DROP_POINTS,
};

/// Score calculation result, including the updated chain counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Base points for the clear (includes B2B multiplier, excludes combo bonus).
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`.
    pub combo_bonus: u32,
    pub total: u32,
    /// Whether a B2B multiplier was applied to this clear.
    pub b2b_applied: bool,
    /// Combo counter after this lock
    pub combo: u32,
    /// Back-to-back counter after this lock
    pub back_to_back: u32,
}

/// Base line clear points: table value times level
/// lines: number of lines cleared (0-4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .map_or(0, |&base| base.saturating_mul(level))
}

/// Combo bonus for the given (already incremented) combo counter
pub fn calculate_combo_bonus(combo: u32) -> u32 {
    COMBO_BASE.saturating_mul(combo).min(COMBO_CAP)
}

/// Apply the B2B multiplier (3/2) to a point value.
pub fn apply_b2b_multiplier(points: u32) -> u32 {
    points.saturating_mul(B2B_NUMERATOR) / B2B_DENOMINATOR
}

/// Calculate the complete score for one lock event.
///
/// `combo` and `back_to_back` are the counters before this lock; the updated
/// values are returned in the result.
pub fn calculate_score(lines: usize, level: u32, combo: u32, back_to_back: u32) -> ScoreResult {
    let base_points = calculate_line_score(lines, level);

    let back_to_back = if lines == 4 { back_to_back + 1 } else { 0 };
    let b2b_applied = back_to_back > 1;
    let line_clear_score = if b2b_applied {
        apply_b2b_multiplier(base_points)
    } else {
        base_points
    };

    let (combo, combo_bonus) = if lines > 0 {
        let combo = combo + 1;
        (combo, calculate_combo_bonus(combo))
    } else {
        (0, 0)
    };

    ScoreResult {
        line_clear_score,
        combo_bonus,
        total: line_clear_score.saturating_add(combo_bonus),
        b2b_applied,
        combo,
        back_to_back,
    }
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells * HARD_DROP_POINTS
    } else {
        cells * SOFT_DROP_POINTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(2, 1), 300);
        assert_eq!(calculate_line_score(3, 1), 500);
        assert_eq!(calculate_line_score(4, 1), 800);

        assert_eq!(calculate_line_score(1, 5), 500);
        assert_eq!(calculate_line_score(4, 3), 2400);
        assert_eq!(calculate_line_score(5, 1), 0);
    }

    #[test]
    fn test_combo_bonus_is_capped() {
        assert_eq!(calculate_combo_bonus(1), 50);
        assert_eq!(calculate_combo_bonus(3), 150);
        assert_eq!(calculate_combo_bonus(4), 200);
        assert_eq!(calculate_combo_bonus(9), 200);
    }

    #[test]
    fn test_b2b_multiplier() {
        assert_eq!(apply_b2b_multiplier(0), 0);
        assert_eq!(apply_b2b_multiplier(800), 1200);
    }

    #[test]
    fn test_single_clear() {
        let result = calculate_score(1, 1, 0, 0);
        assert_eq!(result.line_clear_score, 100);
        assert_eq!(result.combo_bonus, 50);
        assert_eq!(result.total, 150);
        assert_eq!(result.combo, 1);
        assert_eq!(result.back_to_back, 0);
    }

    #[test]
    fn test_first_tetris_has_no_multiplier() {
        let result = calculate_score(4, 2, 0, 0);
        assert_eq!(result.line_clear_score, 1600);
        assert!(!result.b2b_applied);
        assert_eq!(result.back_to_back, 1);
        assert_eq!(result.total, 1650);
    }

    #[test]
    fn test_back_to_back_tetris() {
        // Second Tetris in a row, third clear in the combo chain.
        let result = calculate_score(4, 1, 2, 1);
        assert_eq!(result.line_clear_score, 1200);
        assert!(result.b2b_applied);
        assert_eq!(result.back_to_back, 2);
        assert_eq!(result.combo, 3);
        assert_eq!(result.combo_bonus, 150);
        assert_eq!(result.total, 1350);
    }

    #[test]
    fn test_non_tetris_breaks_back_to_back() {
        let result = calculate_score(2, 1, 1, 3);
        assert_eq!(result.back_to_back, 0);
        assert!(!result.b2b_applied);
        assert_eq!(result.total, 300 + 100);
    }

    #[test]
    fn test_empty_lock_resets_chains() {
        let result = calculate_score(0, 4, 5, 2);
        assert_eq!(result, ScoreResult::default());
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(calculate_drop_score(10, false), 10);
        assert_eq!(calculate_drop_score(10, true), 20);
    }
}
