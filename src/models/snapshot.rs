//! Trimmed export view of a tournament.

use serde::{Deserialize, Serialize};

use super::{LogoRef, MatchResult, Tournament};

/// Team fields carried by a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub name: String,
    pub logo: Option<LogoRef>,
    pub slot: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub name: String,
    pub results: Vec<MatchResult>,
}

/// Name, roster and raw match results of one tournament, without ids or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub name: String,
    pub teams: Vec<TeamSnapshot>,
    pub matches: Vec<MatchSnapshot>,
}

impl From<&Tournament> for TournamentSnapshot {
    fn from(tournament: &Tournament) -> Self {
        Self {
            name: tournament.name.clone(),
            teams: tournament
                .teams()
                .iter()
                .map(|team| TeamSnapshot {
                    name: team.name.clone(),
                    logo: team.logo.clone(),
                    slot: team.slot,
                })
                .collect(),
            matches: tournament
                .matches()
                .iter()
                .map(|m| MatchSnapshot {
                    name: m.name.clone(),
                    results: m.results().to_vec(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Match;

    #[test]
    fn test_snapshot_serializes_without_ids() {
        let mut t = Tournament::new("Cup", &["Alpha", ""]);
        t.push_match(Match::new("Final", 2).with_results(vec![MatchResult::new(4, 2)]));

        let value = serde_json::to_value(TournamentSnapshot::from(&t)).unwrap();
        assert_eq!(value["name"], "Cup");
        assert_eq!(value["teams"][1]["name"], "Team 2");
        assert_eq!(value["teams"][1]["slot"], 2);
        assert!(value["teams"][0]["logo"].is_null());
        assert!(value["teams"][0].get("id").is_none());
        assert_eq!(value["matches"][0]["results"][0]["kills"], 4);
        assert_eq!(value["matches"][0]["results"][1]["position"], 1);
        assert!(value["matches"][0].get("played_at").is_none());
    }
}
