//! Match and per-team match result models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Lowest finishing position that scores.
pub const MIN_POSITION: i32 = 1;

/// Highest finishing position that scores.
pub const MAX_POSITION: i32 = 12;

/// One team's result in one match.
///
/// Deserialization is the single place where loose input is repaired: missing kills
/// become 0, negative kills are floored at 0, and a missing position becomes 1.
/// Out-of-range positions are kept as given; they score nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMatchResult")]
pub struct MatchResult {
    pub kills: u32,
    pub position: i32,
}

impl MatchResult {
    pub fn new(kills: u32, position: i32) -> Self {
        Self { kills, position }
    }

    /// True for a first-place finish.
    pub fn is_win(&self) -> bool {
        self.position == 1
    }
}

impl Default for MatchResult {
    fn default() -> Self {
        Self {
            kills: 0,
            position: MIN_POSITION,
        }
    }
}

#[derive(Deserialize)]
struct RawMatchResult {
    #[serde(default)]
    kills: Option<i64>,
    #[serde(default)]
    position: Option<i64>,
}

impl From<RawMatchResult> for MatchResult {
    fn from(raw: RawMatchResult) -> Self {
        let kills = raw.kills.unwrap_or(0).clamp(0, u32::MAX as i64) as u32;
        let position = raw
            .position
            .map(|p| p.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
            .unwrap_or(MIN_POSITION);
        Self { kills, position }
    }
}

/// Read a results list where `null` entries stand for the default result.
fn results_with_nulls<'de, D>(deserializer: D) -> Result<Vec<MatchResult>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Option<MatchResult>> = Vec::deserialize(deserializer)?;
    Ok(raw.into_iter().map(Option::unwrap_or_default).collect())
}

/// A single match in a tournament's series.
///
/// `results[i]` belongs to the tournament's `teams[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub name: String,

    /// When the match record was created
    pub played_at: DateTime<Utc>,

    #[serde(default, deserialize_with = "results_with_nulls")]
    results: Vec<MatchResult>,
}

impl Match {
    /// Create a match with a default result for each of `team_count` teams.
    pub fn new(name: impl Into<String>, team_count: usize) -> Self {
        Self {
            name: name.into(),
            played_at: Utc::now(),
            results: vec![MatchResult::default(); team_count],
        }
    }

    /// Builder method to set the timestamp.
    pub fn with_played_at(mut self, played_at: DateTime<Utc>) -> Self {
        self.played_at = played_at;
        self
    }

    /// Builder method to set all results at once.
    pub fn with_results(mut self, results: Vec<MatchResult>) -> Self {
        self.results = results;
        self
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    /// Result for the team at `team_index`, or the default when the entry is missing.
    pub fn result_for(&self, team_index: usize) -> MatchResult {
        self.results
            .get(team_index)
            .copied()
            .unwrap_or_default()
    }

    /// Store a result for the team at `team_index`, growing the list if needed.
    pub fn set_result(&mut self, team_index: usize, result: MatchResult) {
        if team_index >= self.results.len() {
            self.results.resize(team_index + 1, MatchResult::default());
        }
        self.results[team_index] = result;
    }

    /// Pad or truncate results so there is exactly one per team.
    pub fn fit_to(&mut self, team_count: usize) {
        self.results.resize(team_count, MatchResult::default());
    }

    /// Whether this is a final match (name contains "final", any case).
    pub fn is_final(&self) -> bool {
        self.name.to_lowercase().contains("final")
    }
}
