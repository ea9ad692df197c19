//! Head-to-head comparison between two teams.
//!
//! Restricted to the matches in which both sides played. Symmetric by
//! construction: querying (B, A) returns the same numbers with the sides
//! swapped.

use polars::prelude::*;
use std::collections::{HashMap, HashSet};

use super::QueryError;
use crate::data::Phase;

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseRate {
    pub phase: Phase,
    pub runs: i64,
    pub balls: i64,
    /// Runs per over while batting in this phase; 0.0 when no balls faced.
    pub run_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamSide {
    pub team: String,
    pub wins: i64,
    /// Matches in which this side batted first.
    pub first_innings: i64,
    pub avg_first_innings: Option<f64>,
    pub phase_rates: Vec<PhaseRate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadToHead {
    pub matches: i64,
    pub no_results: i64,
    pub sides: [TeamSide; 2],
}

/// Aggregate all meetings between `team_a` and `team_b`.
pub fn head_to_head(
    deliveries: &DataFrame,
    matches: &DataFrame,
    team_a: &str,
    team_b: &str,
) -> Result<HeadToHead, QueryError> {
    let ids = matches.column("match_id")?.i64()?;
    let team1 = matches.column("team1")?.str()?;
    let team2 = matches.column("team2")?.str()?;
    let winner = matches.column("winner")?.str()?;

    let mut h2h_ids: HashSet<i64> = HashSet::new();
    let mut total = 0i64;
    let mut no_results = 0i64;
    let mut wins = [0i64, 0i64];

    for i in 0..matches.height() {
        let (Some(id), Some(t1), Some(t2), Some(w)) =
            (ids.get(i), team1.get(i), team2.get(i), winner.get(i))
        else {
            continue;
        };
        let is_pair =
            (t1 == team_a && t2 == team_b) || (t1 == team_b && t2 == team_a);
        if !is_pair {
            continue;
        }

        h2h_ids.insert(id);
        total += 1;
        if w == team_a {
            wins[0] += 1;
        } else if w == team_b {
            wins[1] += 1;
        } else {
            no_results += 1;
        }
    }

    // One pass over the deliveries of those matches: first-innings totals and
    // per-side phase scoring.
    let match_id = deliveries.column("match_id")?.i64()?;
    let inning = deliveries.column("inning")?.i64()?;
    let batting = deliveries.column("batting_team")?.str()?;
    let over = deliveries.column("over")?.i64()?;
    let total_runs = deliveries.column("total_runs")?.i64()?;

    let mut first_innings: HashMap<i64, (usize, i64)> = HashMap::new();
    let mut phase_scoring: HashMap<(usize, Phase), (i64, i64)> = HashMap::new();

    for i in 0..deliveries.height() {
        let (Some(id), Some(inn), Some(team), Some(ov), Some(runs)) = (
            match_id.get(i),
            inning.get(i),
            batting.get(i),
            over.get(i),
            total_runs.get(i),
        ) else {
            continue;
        };
        if !h2h_ids.contains(&id) {
            continue;
        }
        let side = if team == team_a {
            0
        } else if team == team_b {
            1
        } else {
            continue;
        };

        if inn == 1 {
            let entry = first_innings.entry(id).or_insert((side, 0));
            entry.1 += runs;
        }

        let entry = phase_scoring
            .entry((side, Phase::of_over(ov)))
            .or_insert((0, 0));
        entry.0 += runs;
        entry.1 += 1;
    }

    let sides = [team_a, team_b].map(|team| {
        let side = usize::from(team == team_b);

        let totals: Vec<i64> = first_innings
            .values()
            .filter(|(s, _)| *s == side)
            .map(|(_, runs)| *runs)
            .collect();
        let avg_first_innings = if totals.is_empty() {
            None
        } else {
            Some(totals.iter().sum::<i64>() as f64 / totals.len() as f64)
        };

        let phase_rates = Phase::ALL
            .iter()
            .map(|phase| {
                let (runs, balls) = phase_scoring
                    .get(&(side, *phase))
                    .copied()
                    .unwrap_or((0, 0));
                let run_rate = if balls > 0 {
                    runs as f64 * 6.0 / balls as f64
                } else {
                    0.0
                };
                PhaseRate {
                    phase: *phase,
                    runs,
                    balls,
                    run_rate,
                }
            })
            .collect();

        TeamSide {
            team: team.to_string(),
            wins: wins[side],
            first_innings: totals.len() as i64,
            avg_first_innings,
            phase_rates,
        }
    });

    Ok(HeadToHead {
        matches: total,
        no_results,
        sides,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::fixtures::{self, CSK, KKR, MI};

    #[test]
    fn win_counts_and_first_innings_averages() {
        let ds = fixtures::dataset();
        let h2h = head_to_head(ds.deliveries(), ds.matches(), MI, CSK).unwrap();

        assert_eq!(h2h.matches, 2);
        assert_eq!(h2h.no_results, 0);

        let [mi, csk] = &h2h.sides;
        assert_eq!(mi.team, MI);
        assert_eq!(mi.wins, 1);
        assert_eq!(csk.wins, 1);

        // MI batted first in match 1 (19), CSK in match 2 (26).
        assert_eq!(mi.avg_first_innings, Some(19.0));
        assert_eq!(csk.avg_first_innings, Some(26.0));
    }

    #[test]
    fn phase_run_rates_cover_only_head_to_head_balls() {
        let ds = fixtures::dataset();
        let h2h = head_to_head(ds.deliveries(), ds.matches(), MI, CSK).unwrap();

        let mi = &h2h.sides[0];
        // MI powerplay in matches 1 and 2: 15 runs off 7 balls.
        let pp = &mi.phase_rates[0];
        assert_eq!(pp.phase, Phase::Powerplay);
        assert_eq!((pp.runs, pp.balls), (15, 7));
        assert!((pp.run_rate - 15.0 * 6.0 / 7.0).abs() < 1e-9);

        // MI faced no middle overs against CSK.
        let middle = &mi.phase_rates[1];
        assert_eq!((middle.runs, middle.balls), (0, 0));
        assert_eq!(middle.run_rate, 0.0);

        // Match 3 (vs KKR) must not leak in: MI death overs only from match 1.
        let death = &mi.phase_rates[2];
        assert_eq!((death.runs, death.balls), (8, 3));
    }

    #[test]
    fn symmetric_under_argument_swap() {
        let ds = fixtures::dataset();
        let ab = head_to_head(ds.deliveries(), ds.matches(), MI, CSK).unwrap();
        let ba = head_to_head(ds.deliveries(), ds.matches(), CSK, MI).unwrap();

        assert_eq!(ab.matches, ba.matches);
        assert_eq!(ab.no_results, ba.no_results);
        assert_eq!(ab.sides[0], ba.sides[1]);
        assert_eq!(ab.sides[1], ba.sides[0]);
    }

    #[test]
    fn unknown_pairing_is_empty_not_an_error() {
        let ds = fixtures::dataset();
        let h2h = head_to_head(ds.deliveries(), ds.matches(), CSK, KKR).unwrap();
        assert_eq!(h2h.matches, 0);
        assert_eq!(h2h.sides[0].wins, 0);
        assert_eq!(h2h.sides[0].avg_first_innings, None);
    }
}
