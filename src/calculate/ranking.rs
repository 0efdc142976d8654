//! Ranked tables built from cumulative standings.

use std::cmp::Ordering;

use crate::models::{CurrentMatchRow, MatchLine, RankedTeam, Tournament};

use super::points::points_for_position;
use super::standings::compute_standings;

/// Tie-break order: total, kills, wins (all descending), then slot ascending.
///
/// Team index is a last resort for malformed data with duplicate slots, so the order is
/// always total.
fn standing_order(a: &RankedTeam, b: &RankedTeam) -> Ordering {
    b.total
        .cmp(&a.total)
        .then(b.kills.cmp(&a.kills))
        .then(b.wins.cmp(&a.wins))
        .then(a.team.slot.cmp(&b.team.slot))
        .then(a.team_index.cmp(&b.team_index))
}

/// Rank every team by cumulative figures through match `upto` (see [`compute_standings`]).
pub fn rank_teams(tournament: &Tournament, upto: Option<usize>) -> Vec<RankedTeam> {
    let standings = compute_standings(tournament, upto);

    let mut rows: Vec<RankedTeam> = tournament
        .teams()
        .iter()
        .enumerate()
        .map(|(i, team)| RankedTeam {
            rank: 0,
            team: team.clone(),
            team_index: i,
            total: standings.totals[i],
            kills: standings.kills[i],
            position_points: standings.position_points[i],
            wins: standings.wins[i],
        })
        .collect();

    rows.sort_by(standing_order);
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u32 + 1;
    }

    rows
}

/// Ranked table for a single selected match.
///
/// Ordering uses the cumulative figures through that match; each row also carries the
/// team's own kills, position and points in the match. Returns `None` if the match does
/// not exist.
pub fn rank_current_match(
    tournament: &Tournament,
    match_index: usize,
) -> Option<Vec<CurrentMatchRow>> {
    let m = tournament.match_at(match_index)?;

    let rows = rank_teams(tournament, Some(match_index))
        .into_iter()
        .map(|cumulative| {
            let result = m.result_for(cumulative.team_index);
            let points = points_for_position(result.position);
            CurrentMatchRow {
                in_match: MatchLine {
                    kills: result.kills,
                    position: result.position,
                    points,
                    total: result.kills.saturating_add(points),
                },
                cumulative,
            }
        })
        .collect();

    Some(rows)
}

/// Top `size` teams through match `match_index`.
pub fn podium(tournament: &Tournament, match_index: usize, size: usize) -> Vec<RankedTeam> {
    let mut rows = rank_teams(tournament, Some(match_index));
    rows.truncate(size);
    rows
}
