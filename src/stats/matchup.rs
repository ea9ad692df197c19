//! Batsman-vs-bowler matchup analysis.

use polars::prelude::*;

use super::QueryError;
use crate::data::Phase;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchupPhase {
    pub phase: Phase,
    pub balls: i64,
    pub runs: i64,
    pub wickets: i64,
    pub strike_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Matchup {
    pub batter: String,
    pub bowler: String,
    pub balls: i64,
    pub runs: i64,
    pub wickets: i64,
    pub dot_balls: i64,
    pub boundaries: i64,
    pub strike_rate: f64,
    /// Dismissals per hundred balls of this matchup.
    pub dismissal_rate: f64,
    /// Phases in which at least one ball was bowled, in innings order.
    pub phases: Vec<MatchupPhase>,
}

/// Head-to-head between one batter and one bowler. A pairing that never
/// occurred yields a zeroed summary with no phases.
pub fn matchup(
    deliveries: &DataFrame,
    batter: &str,
    bowler: &str,
) -> Result<Matchup, QueryError> {
    let df = deliveries
        .clone()
        .lazy()
        .filter(
            col("batter")
                .eq(lit(batter))
                .and(col("bowler").eq(lit(bowler))),
        )
        .collect()?;

    let over = df.column("over")?.i64()?;
    let batsman_runs = df.column("batsman_runs")?.i64()?;
    let is_wicket = df.column("is_wicket")?.i64()?;

    let mut balls = 0i64;
    let mut runs = 0i64;
    let mut wickets = 0i64;
    let mut dot_balls = 0i64;
    let mut boundaries = 0i64;
    // (balls, runs, wickets) per phase, in Phase::ALL order.
    let mut by_phase = [(0i64, 0i64, 0i64); 3];

    for i in 0..df.height() {
        let (Some(ov), Some(r), Some(w)) =
            (over.get(i), batsman_runs.get(i), is_wicket.get(i))
        else {
            continue;
        };

        balls += 1;
        runs += r;
        wickets += w;
        if r == 0 {
            dot_balls += 1;
        }
        if r >= 4 {
            boundaries += 1;
        }

        let slot = match Phase::of_over(ov) {
            Phase::Powerplay => 0,
            Phase::MiddleOvers => 1,
            Phase::DeathOvers => 2,
        };
        by_phase[slot].0 += 1;
        by_phase[slot].1 += r;
        by_phase[slot].2 += w;
    }

    let phases = Phase::ALL
        .iter()
        .zip(by_phase.iter())
        .filter(|(_, (balls, _, _))| *balls > 0)
        .map(|(phase, (balls, runs, wickets))| MatchupPhase {
            phase: *phase,
            balls: *balls,
            runs: *runs,
            wickets: *wickets,
            strike_rate: *runs as f64 / (*balls).max(1) as f64 * 100.0,
        })
        .collect();

    Ok(Matchup {
        batter: batter.to_string(),
        bowler: bowler.to_string(),
        balls,
        runs,
        wickets,
        dot_balls,
        boundaries,
        strike_rate: runs as f64 / balls.max(1) as f64 * 100.0,
        dismissal_rate: wickets as f64 / balls.max(1) as f64 * 100.0,
        phases,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::fixtures;

    #[test]
    fn aggregates_only_the_pairing() {
        let ds = fixtures::dataset();
        let m = matchup(ds.deliveries(), "MS Dhoni", "Jasprit Bumrah").unwrap();

        assert_eq!(m.balls, 9);
        assert_eq!(m.runs, 33);
        assert_eq!(m.wickets, 1);
        assert_eq!(m.dot_balls, 2);
        assert_eq!(m.boundaries, 6);
        assert!((m.strike_rate - 33.0 / 9.0 * 100.0).abs() < 1e-9);
        assert!((m.dismissal_rate - 1.0 / 9.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn phase_breakdown_skips_empty_phases() {
        let ds = fixtures::dataset();
        let m = matchup(ds.deliveries(), "MS Dhoni", "Jasprit Bumrah").unwrap();

        // Powerplay, middle and death all occur for this pairing.
        assert_eq!(m.phases.len(), 3);
        let pp = &m.phases[0];
        assert_eq!(pp.phase, Phase::Powerplay);
        assert_eq!((pp.balls, pp.runs, pp.wickets), (5, 15, 0));
        assert!((pp.strike_rate - 300.0).abs() < 1e-9);

        let death = &m.phases[2];
        assert_eq!(death.phase, Phase::DeathOvers);
        assert_eq!((death.balls, death.runs), (2, 12));

        // A pairing confined to the powerplay reports a single phase.
        let narine = matchup(ds.deliveries(), "Suryakumar Yadav", "Sunil Narine").unwrap();
        assert_eq!(narine.phases.len(), 1);
        assert_eq!(narine.phases[0].phase, Phase::Powerplay);
    }

    #[test]
    fn unknown_pairing_is_empty_not_an_error() {
        let ds = fixtures::dataset();
        let m = matchup(ds.deliveries(), "MS Dhoni", "Sunil Narine").unwrap();
        assert_eq!(m.balls, 0);
        assert_eq!(m.runs, 0);
        assert_eq!(m.strike_rate, 0.0);
        assert!(m.phases.is_empty());
    }
}
