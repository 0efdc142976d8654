//! Match series generation.

use chrono::Utc;
use thiserror::Error;

use crate::models::{Match, Tournament};

/// Errors from series generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Series needs at least one match (got {0})")]
    InvalidCount(usize),
}

/// Name of the match at 1-based `number` in a series of `count`.
pub fn series_match_name(number: usize, count: usize) -> String {
    if number == count {
        "Final".to_string()
    } else {
        format!("Match {}", number)
    }
}

/// Build `count` fresh matches for `tournament`: `Match 1` .. `Match {count-1}`, then
/// `Final`. Every match is stamped with the same creation time and holds a default
/// result per team. The caller appends them.
pub fn generate_series(tournament: &Tournament, count: usize) -> Result<Vec<Match>, SeriesError> {
    if count < 1 {
        return Err(SeriesError::InvalidCount(count));
    }

    let now = Utc::now();
    let team_count = tournament.team_count();

    Ok((1..=count)
        .map(|n| Match::new(series_match_name(n, count), team_count).with_played_at(now))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchResult;

    #[test]
    fn test_series_of_three() {
        let t = Tournament::new("Cup", &["A", "B", "C", "D"]);
        let series = generate_series(&t, 3).unwrap();

        let names: Vec<&str> = series.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Match 1", "Match 2", "Final"]);
        for m in &series {
            assert_eq!(m.results().len(), 4);
            assert!(m.results().iter().all(|r| *r == MatchResult::default()));
        }
        assert!(series.iter().all(|m| m.played_at == series[0].played_at));
    }

    #[test]
    fn test_series_of_one_is_just_the_final() {
        let t = Tournament::new("Cup", &["A"]);
        let series = generate_series(&t, 1).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "Final");
        assert!(series[0].is_final());
    }

    #[test]
    fn test_zero_count_rejected() {
        let t = Tournament::new("Cup", &["A"]);
        assert_eq!(generate_series(&t, 0), Err(SeriesError::InvalidCount(0)));
    }

    #[test]
    fn test_generation_does_not_touch_tournament() {
        let t = Tournament::new("Cup", &["A", "B"]);
        let before = t.clone();
        let _ = generate_series(&t, 5).unwrap();
        assert_eq!(t, before);
    }

    #[test]
    fn test_series_match_name() {
        assert_eq!(series_match_name(1, 4), "Match 1");
        assert_eq!(series_match_name(4, 4), "Final");
    }
}
