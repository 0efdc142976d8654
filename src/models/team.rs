//! Team model.

use serde::{Deserialize, Serialize};

use super::{EntityId, LogoRef, TeamId, TournamentId};

/// A team registered in a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier (derived from tournament id + slot)
    pub id: TeamId,

    /// Display name
    pub name: String,

    /// Logo handle issued by the image store, if any
    #[serde(default)]
    pub logo: Option<LogoRef>,

    /// Draw position, 1-based. Final ranking tie-break.
    pub slot: u32,
}

impl Team {
    /// Create a new Team with auto-generated ID.
    ///
    /// A blank name falls back to `Team {slot}`.
    pub fn new(tournament_id: &TournamentId, name: &str, slot: u32) -> Self {
        let name = name.trim();
        let name = if name.is_empty() {
            format!("Team {}", slot)
        } else {
            name.to_string()
        };

        Self {
            id: EntityId::generate(&[tournament_id.as_str(), &slot.to_string()]),
            name,
            logo: None,
            slot,
        }
    }

    /// First character of the name, used where no logo is available.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_creation() {
        let tid = EntityId::from("tournament-1");
        let team = Team::new(&tid, "  Red Wolves ", 3);

        assert_eq!(team.name, "Red Wolves");
        assert_eq!(team.slot, 3);
        assert!(team.logo.is_none());
        assert_eq!(team.initial(), Some('R'));
    }

    #[test]
    fn test_blank_name_falls_back_to_slot() {
        let tid = EntityId::from("tournament-1");
        let team = Team::new(&tid, "   ", 7);
        assert_eq!(team.name, "Team 7");
    }

    #[test]
    fn test_team_id_depends_on_slot_not_name() {
        let tid = EntityId::from("tournament-1");
        let a = Team::new(&tid, "Alpha", 1);
        let b = Team::new(&tid, "Renamed", 1);
        let c = Team::new(&tid, "Alpha", 2);

        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_team_deserializes_without_logo() {
        let json = r#"{"id":"abc","name":"Solo","slot":1}"#;
        let team: Team = serde_json::from_str(json).unwrap();
        assert!(team.logo.is_none());
    }
}
