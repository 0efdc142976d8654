//! Cumulative standings across a match series.

use crate::models::{Standings, Tournament};

use super::points::points_for_position;

/// Fold matches `0..=upto` into per-team cumulative totals.
///
/// `None` means "before the first match" and yields all zeros. An index past the end of
/// the match list covers every match. Missing result entries count as the default result.
/// Nothing is cached: the output depends only on the teams and the selected match prefix.
pub fn compute_standings(tournament: &Tournament, upto: Option<usize>) -> Standings {
    let team_count = tournament.team_count();
    let mut standings = Standings::zeroed(team_count);

    let Some(upto) = upto else {
        return standings;
    };

    for m in tournament.matches().iter().take(upto.saturating_add(1)) {
        for i in 0..team_count {
            let result = m.result_for(i);
            let points = points_for_position(result.position);

            standings.kills[i] = standings.kills[i].saturating_add(result.kills);
            standings.position_points[i] = standings.position_points[i].saturating_add(points);
            standings.totals[i] = standings.totals[i]
                .saturating_add(result.kills)
                .saturating_add(points);
            if result.is_win() {
                standings.wins[i] += 1;
            }
        }
    }

    standings
}
