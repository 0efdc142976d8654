//! Operator session: the tournament list plus the active selection.
//!
//! All mutation of tournaments goes through here. Scores are never cached; every query
//! re-derives from the match list via [`crate::calculate`].

use std::collections::HashSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculate::{self, SeriesError};
use crate::models::{
    CurrentMatchRow, LogoRef, Match, MatchResult, RankedTeam, Tournament, TournamentSnapshot,
    MAX_POSITION, MIN_POSITION,
};

/// Validation failures reported back to the operator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("A tournament named '{0}' already exists")]
    DuplicateTournament(String),

    #[error("No tournament selected")]
    NoActiveTournament,

    #[error("No match selected")]
    NoActiveMatch,

    #[error("Tournament not found: {0}")]
    TournamentNotFound(usize),

    #[error("Match not found: {0}")]
    MatchNotFound(usize),

    #[error("Team not found: {0}")]
    TeamNotFound(usize),

    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// The operator's working state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    tournaments: Vec<Tournament>,

    #[serde(default)]
    active_tournament: Option<usize>,

    #[serde(default)]
    current_match: Option<usize>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_tournament
    }

    pub fn current_match_index(&self) -> Option<usize> {
        self.current_match
    }

    pub fn active(&self) -> Option<&Tournament> {
        self.active_tournament.and_then(|i| self.tournaments.get(i))
    }

    fn active_mut(&mut self) -> Result<&mut Tournament, SessionError> {
        self.active_tournament
            .and_then(|i| self.tournaments.get_mut(i))
            .ok_or(SessionError::NoActiveTournament)
    }

    fn require_active(&self) -> Result<&Tournament, SessionError> {
        self.active().ok_or(SessionError::NoActiveTournament)
    }

    /// The selected match, if it still exists.
    pub fn current(&self) -> Option<&Match> {
        let idx = self.current_match?;
        self.active()?.match_at(idx)
    }

    /// Create a tournament and make it active.
    pub fn create_tournament<S: AsRef<str>>(
        &mut self,
        name: &str,
        team_names: &[S],
    ) -> Result<&Tournament, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if self.tournaments.iter().any(|t| t.has_name(name)) {
            return Err(SessionError::DuplicateTournament(name.to_string()));
        }

        let tournament = Tournament::new(name, team_names);
        info!(
            "Created tournament '{}' with {} teams",
            tournament.name,
            tournament.team_count()
        );
        self.tournaments.push(tournament);
        let idx = self.tournaments.len() - 1;
        self.active_tournament = Some(idx);
        self.current_match = None;

        Ok(&self.tournaments[idx])
    }

    /// Delete the active tournament. Returns the logo handles it held so the image store
    /// can release them.
    pub fn delete_active_tournament(&mut self) -> Result<Vec<LogoRef>, SessionError> {
        let idx = self
            .active_tournament
            .filter(|&i| i < self.tournaments.len())
            .ok_or(SessionError::NoActiveTournament)?;

        let removed = self.tournaments.remove(idx);
        info!(
            "Deleted tournament '{}' ({} matches)",
            removed.name,
            removed.matches().len()
        );

        self.active_tournament = if self.tournaments.is_empty() {
            None
        } else {
            Some(idx.saturating_sub(1))
        };
        self.current_match = None;

        Ok(removed.logo_refs())
    }

    pub fn select_tournament(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.tournaments.len() {
            return Err(SessionError::TournamentNotFound(index));
        }
        self.active_tournament = Some(index);
        self.current_match = None;
        debug!("Selected tournament {}", index);
        Ok(())
    }

    /// Append a single match with default results and select it.
    pub fn add_match(&mut self, name: &str) -> Result<usize, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }

        let tournament = self.active_mut()?;
        let m = Match::new(name, tournament.team_count());
        let idx = tournament.push_match(m);
        debug!("Added match '{}' at index {}", name, idx);

        self.current_match = Some(idx);
        Ok(idx)
    }

    /// Append a generated series and select its final. Returns the new match indices.
    pub fn generate_series(&mut self, count: usize) -> Result<Range<usize>, SessionError> {
        let tournament = self.active_mut()?;
        let series = calculate::generate_series(tournament, count)?;

        let start = tournament.matches().len();
        tournament.extend_matches(series);
        let end = tournament.matches().len();
        info!("Generated {} matches for '{}'", end - start, tournament.name);

        self.current_match = end.checked_sub(1);
        Ok(start..end)
    }

    pub fn select_match(&mut self, index: usize) -> Result<(), SessionError> {
        let tournament = self.require_active()?;
        if tournament.match_at(index).is_none() {
            return Err(SessionError::MatchNotFound(index));
        }
        self.current_match = Some(index);
        Ok(())
    }

    pub fn rename_match(&mut self, index: usize, name: &str) -> Result<(), SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        let m = self
            .active_mut()?
            .match_mut(index)
            .ok_or(SessionError::MatchNotFound(index))?;
        m.name = name.to_string();
        Ok(())
    }

    /// Delete a match, keeping the current selection pointed at the same match.
    pub fn delete_match(&mut self, index: usize) -> Result<Match, SessionError> {
        let removed = self
            .active_mut()?
            .remove_match(index)
            .ok_or(SessionError::MatchNotFound(index))?;

        self.current_match = match self.current_match {
            Some(cur) if cur == index => None,
            Some(cur) if cur > index => Some(cur - 1),
            other => other,
        };
        debug!("Deleted match '{}'", removed.name);
        Ok(removed)
    }

    /// Record kills and position for a team in the current match.
    ///
    /// Position is clamped to 1..=12.
    pub fn record_result(
        &mut self,
        team_index: usize,
        kills: u32,
        position: i32,
    ) -> Result<MatchResult, SessionError> {
        let match_index = self.current_match.ok_or(SessionError::NoActiveMatch)?;
        let tournament = self.active_mut()?;
        if team_index >= tournament.team_count() {
            return Err(SessionError::TeamNotFound(team_index));
        }
        let m = tournament
            .match_mut(match_index)
            .ok_or(SessionError::NoActiveMatch)?;

        let result = MatchResult::new(kills, position.clamp(MIN_POSITION, MAX_POSITION));
        m.set_result(team_index, result);
        debug!(
            "Recorded {} kills, position {} for team {} in '{}'",
            result.kills, result.position, team_index, m.name
        );
        Ok(result)
    }

    /// Swap a team's logo. Returns the handle that was replaced.
    pub fn set_team_logo(
        &mut self,
        team_index: usize,
        logo: Option<LogoRef>,
    ) -> Result<Option<LogoRef>, SessionError> {
        let slot = self
            .active_mut()?
            .team_logo_mut(team_index)
            .ok_or(SessionError::TeamNotFound(team_index))?;
        Ok(std::mem::replace(slot, logo))
    }

    /// Ranked series table through `upto` (defaults to the current match).
    pub fn standings(&self, upto: Option<usize>) -> Result<Vec<RankedTeam>, SessionError> {
        let tournament = self.require_active()?;
        Ok(calculate::rank_teams(tournament, upto.or(self.current_match)))
    }

    /// Ranked table for the current match.
    pub fn current_table(&self) -> Result<Vec<CurrentMatchRow>, SessionError> {
        let tournament = self.require_active()?;
        let idx = self.current_match.ok_or(SessionError::NoActiveMatch)?;
        calculate::rank_current_match(tournament, idx).ok_or(SessionError::NoActiveMatch)
    }

    /// Export view of the active tournament.
    pub fn active_snapshot(&self) -> Option<TournamentSnapshot> {
        self.active().map(TournamentSnapshot::from)
    }

    /// Repair state after loading it from storage.
    ///
    /// Drops later tournaments whose names collide ignoring case, fixes dangling
    /// selections, fits every match's results to its team list, and selects the first
    /// tournament (and its last match) when nothing is selected.
    pub fn restore(&mut self) {
        let mut seen = HashSet::new();
        let before = self.tournaments.len();
        self.tournaments
            .retain(|t| seen.insert(t.name.trim().to_lowercase()));
        if self.tournaments.len() != before {
            warn!(
                "Dropped {} duplicate tournaments",
                before - self.tournaments.len()
            );
        }

        for t in &mut self.tournaments {
            let repaired = t.normalize();
            if repaired > 0 {
                warn!("Repaired results in {} matches of '{}'", repaired, t.name);
            }
        }

        if self
            .active_tournament
            .is_some_and(|i| i >= self.tournaments.len())
        {
            self.active_tournament = if self.tournaments.is_empty() {
                None
            } else {
                Some(0)
            };
            self.current_match = None;
        }

        if self.active_tournament.is_none() && !self.tournaments.is_empty() {
            self.active_tournament = Some(0);
            if self.current_match.is_none() {
                self.current_match = self.tournaments[0].last_match_index();
            }
        }

        let match_count = self.active().map_or(0, |t| t.matches().len());
        if self.current_match.is_some_and(|i| i >= match_count) {
            self.current_match = None;
        }
    }
}
