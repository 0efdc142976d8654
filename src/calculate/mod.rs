//! Scoring and ranking engine.
//!
//! Pure functions over an in-memory [`Tournament`](crate::models::Tournament):
//! - Position point table
//! - Cumulative standings through a chosen match
//! - Tie-broken rankings (series view, current-match view, podium)
//! - Series generation
//!
//! Nothing here holds state between calls or logs.

mod points;
mod ranking;
mod series;
mod standings;

pub use points::{points_for_position, result_points, POSITION_POINTS};
pub use ranking::{podium, rank_current_match, rank_teams};
pub use series::{generate_series, series_match_name, SeriesError};
pub use standings::compute_standings;
