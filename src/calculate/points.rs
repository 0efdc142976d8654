//! Position point table.

use crate::models::{MatchResult, MAX_POSITION, MIN_POSITION};

/// Points per finishing position, 1st through 12th.
pub const POSITION_POINTS: [u32; 12] = [12, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 0];

/// Points awarded for a finishing position. Anything outside 1..=12 scores 0.
pub fn points_for_position(position: i32) -> u32 {
    if (MIN_POSITION..=MAX_POSITION).contains(&position) {
        POSITION_POINTS[(position - MIN_POSITION) as usize]
    } else {
        0
    }
}

/// Kills plus position points for a single result.
pub fn result_points(result: &MatchResult) -> u32 {
    result
        .kills
        .saturating_add(points_for_position(result.position))
}
