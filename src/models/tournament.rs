//! Tournament model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, LogoRef, Match, Team, TournamentId};

/// A tournament: a fixed team list and an ordered series of matches.
///
/// Match results are positional (`results[i]` is `teams[i]`), so the team list is fixed
/// at creation and only exposed read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    /// Unique identifier (derived from the lowercased name)
    pub id: TournamentId,

    /// Tournament name, unique across tournaments ignoring case
    pub name: String,

    /// When the tournament was created
    pub created_at: DateTime<Utc>,

    teams: Vec<Team>,

    #[serde(default)]
    matches: Vec<Match>,
}

impl Tournament {
    /// Create a tournament with one team per entry in `team_names`, slotted 1..=n.
    pub fn new<S: AsRef<str>>(name: &str, team_names: &[S]) -> Self {
        let name = name.trim().to_string();
        let id = EntityId::generate(&[&name.to_lowercase()]);
        let teams = team_names
            .iter()
            .enumerate()
            .map(|(i, team_name)| Team::new(&id, team_name.as_ref(), i as u32 + 1))
            .collect();

        Self {
            id,
            name,
            created_at: Utc::now(),
            teams,
            matches: Vec::new(),
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn match_at(&self, index: usize) -> Option<&Match> {
        self.matches.get(index)
    }

    pub fn match_mut(&mut self, index: usize) -> Option<&mut Match> {
        self.matches.get_mut(index)
    }

    /// Index of the most recent match, if any.
    pub fn last_match_index(&self) -> Option<usize> {
        self.matches.len().checked_sub(1)
    }

    /// Append a match, fitting its results to the team list. Returns its index.
    pub fn push_match(&mut self, mut m: Match) -> usize {
        m.fit_to(self.teams.len());
        self.matches.push(m);
        self.matches.len() - 1
    }

    /// Append several matches in order.
    pub fn extend_matches(&mut self, matches: impl IntoIterator<Item = Match>) {
        for m in matches {
            self.push_match(m);
        }
    }

    pub fn remove_match(&mut self, index: usize) -> Option<Match> {
        if index < self.matches.len() {
            Some(self.matches.remove(index))
        } else {
            None
        }
    }

    /// Mutable access to a team's logo slot; the only team field that may change.
    pub fn team_logo_mut(&mut self, team_index: usize) -> Option<&mut Option<LogoRef>> {
        self.teams.get_mut(team_index).map(|t| &mut t.logo)
    }

    /// All logo handles held by this tournament's teams.
    pub fn logo_refs(&self) -> Vec<LogoRef> {
        self.teams.iter().filter_map(|t| t.logo.clone()).collect()
    }

    /// Whether `name` matches this tournament's name ignoring case and surrounding whitespace.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Fit every match's results to the team count. Returns how many matches changed.
    pub fn normalize(&mut self) -> usize {
        let team_count = self.teams.len();
        let mut repaired = 0;
        for m in &mut self.matches {
            if m.results().len() != team_count {
                m.fit_to(team_count);
                repaired += 1;
            }
        }
        repaired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchResult;

    fn sample() -> Tournament {
        Tournament::new("Summer Cup", &["Alpha", "Bravo", "Charlie"])
    }

    #[test]
    fn test_tournament_creation() {
        let t = sample();
        assert_eq!(t.name, "Summer Cup");
        assert_eq!(t.team_count(), 3);
        assert!(t.matches().is_empty());
        assert_eq!(
            t.teams().iter().map(|t| t.slot).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_tournament_id_ignores_case() {
        let a = Tournament::new("Summer Cup", &["A"]);
        let b = Tournament::new("SUMMER CUP", &["A"]);
        assert_eq!(a.id, b.id);
        assert!(a.has_name(" summer cup "));
    }

    #[test]
    fn test_push_match_fits_results() {
        let mut t = sample();
        let idx = t.push_match(Match::new("Match 1", 1));
        assert_eq!(idx, 0);
        assert_eq!(t.matches()[0].results().len(), 3);
        assert_eq!(t.last_match_index(), Some(0));
    }

    #[test]
    fn test_remove_match_out_of_range() {
        let mut t = sample();
        t.push_match(Match::new("Match 1", 3));
        assert!(t.remove_match(4).is_none());
        assert!(t.remove_match(0).is_some());
        assert_eq!(t.last_match_index(), None);
    }

    #[test]
    fn test_logo_swap_and_refs() {
        let mut t = sample();
        *t.team_logo_mut(1).unwrap() = Some(LogoRef::new("img:1"));
        assert_eq!(t.logo_refs(), vec![LogoRef::new("img:1")]);
        assert!(t.team_logo_mut(9).is_none());
    }

    #[test]
    fn test_normalize_repairs_mismatched_results() {
        let json = r#"{
            "id": "x",
            "name": "Loaded",
            "created_at": "2025-10-17T12:00:00Z",
            "teams": [
                {"id": "a", "name": "A", "slot": 1},
                {"id": "b", "name": "B", "slot": 2}
            ],
            "matches": [
                {"name": "Match 1", "played_at": "2025-10-17T12:00:00Z", "results": [{"kills": 3, "position": 2}]},
                {"name": "Match 2", "played_at": "2025-10-17T12:00:00Z", "results": [{}, {}]}
            ]
        }"#;
        let mut t: Tournament = serde_json::from_str(json).unwrap();

        assert_eq!(t.normalize(), 1);
        assert_eq!(t.matches()[0].results().len(), 2);
        assert_eq!(t.matches()[0].result_for(0), MatchResult::new(3, 2));
        assert_eq!(t.matches()[0].result_for(1), MatchResult::default());
    }

    #[test]
    fn test_tournament_serialization() {
        let mut t = sample();
        t.push_match(Match::new("Final", 3));
        let json = serde_json::to_string(&t).unwrap();
        let parsed: Tournament = serde_json::from_str(&json).unwrap();
        assert_eq!(t, parsed);
    }
}
