//! Derived standings models.

use serde::{Deserialize, Serialize};

use super::Team;

/// Cumulative per-team metrics through a match, indexed like the tournament's team list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    /// Kills plus position points
    pub totals: Vec<u32>,
    pub kills: Vec<u32>,
    pub position_points: Vec<u32>,
    /// First-place finishes
    pub wins: Vec<u32>,
}

impl Standings {
    /// All-zero standings for `team_count` teams.
    pub fn zeroed(team_count: usize) -> Self {
        Self {
            totals: vec![0; team_count],
            kills: vec![0; team_count],
            position_points: vec![0; team_count],
            wins: vec![0; team_count],
        }
    }

    pub fn team_count(&self) -> usize {
        self.totals.len()
    }
}

/// One row of a ranked table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTeam {
    /// 1-based, strictly increasing, no shared ranks
    pub rank: u32,
    pub team: Team,
    /// Position of the team in the tournament's team list
    pub team_index: usize,
    pub total: u32,
    pub kills: u32,
    pub position_points: u32,
    pub wins: u32,
}

/// Single-match figures for one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLine {
    pub kills: u32,
    pub position: i32,
    pub points: u32,
    /// Kills plus points for this match alone
    pub total: u32,
}

/// A ranked row for the current-match view: ordered by the cumulative figures, but also
/// carrying what the team did in the selected match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentMatchRow {
    #[serde(flatten)]
    pub cumulative: RankedTeam,
    #[serde(rename = "match")]
    pub in_match: MatchLine,
}
