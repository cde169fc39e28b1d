//! Classic stack features used to rank placements.

use blockfall_core::Board;
use blockfall_types::{BOARD_HEIGHT, BOARD_WIDTH};

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridFeatures {
    pub max_h: u32,
    pub agg_h: u32,
    pub holes: u32,
    pub bump: u32,
}

/// Compute features on a locked board. O(W*H), no allocations.
pub fn compute_grid_features(board: &Board) -> GridFeatures {
    let heights = column_heights(board);

    let mut max_h = 0u32;
    let mut agg_h = 0u32;
    for &h in &heights {
        max_h = max_h.max(h);
        agg_h += h;
    }

    GridFeatures {
        max_h,
        agg_h,
        holes: count_holes(board, &heights),
        bump: bumpiness(&heights),
    }
}

pub fn column_heights(board: &Board) -> [u32; W] {
    let mut heights = [0u32; W];
    for (x, h) in heights.iter_mut().enumerate() {
        *h = u32::from(board.column_height(x));
    }
    heights
}

/// Empty cells below the top filled cell of their column
fn count_holes(board: &Board, heights: &[u32; W]) -> u32 {
    let mut holes = 0u32;
    for (x, &h) in heights.iter().enumerate() {
        let top = H - h as usize;
        holes += board.rows()[top..]
            .iter()
            .filter(|row| row[x].is_none())
            .count() as u32;
    }
    holes
}

fn bumpiness(heights: &[u32; W]) -> u32 {
    heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum()
}
