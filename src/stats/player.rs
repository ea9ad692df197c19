//! Per-player performance profiles.
//!
//! A profile is everything the player page shows: career totals, pressure
//! splits (powerplay vs death overs) and a per-match form trend. An unknown
//! player yields a zeroed profile with an empty trend.

use polars::prelude::*;
use std::collections::BTreeMap;

use super::QueryError;
use crate::data::Phase;

/// One point of a form trend, in match order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPoint {
    pub match_index: usize,
    pub value: f64,
    /// Rolling mean of `value` over the configured window.
    pub rolling: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BattingSplit {
    pub runs: i64,
    pub balls: i64,
    pub boundaries: i64,
    pub strike_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BattingProfile {
    pub player: String,
    pub runs: i64,
    pub balls: i64,
    pub strike_rate: f64,
    pub fours: i64,
    pub sixes: i64,
    pub innings: i64,
    pub powerplay: BattingSplit,
    pub death: BattingSplit,
    pub form: Vec<FormPoint>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BowlingSplit {
    pub wickets: i64,
    pub balls: i64,
    pub runs_conceded: i64,
    pub dot_balls: i64,
    pub economy: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BowlingProfile {
    pub player: String,
    pub wickets: i64,
    pub balls: i64,
    pub runs_conceded: i64,
    pub economy: f64,
    pub dot_balls: i64,
    pub matches: i64,
    pub powerplay: BowlingSplit,
    pub death: BowlingSplit,
    pub form: Vec<FormPoint>,
}

fn strike_rate(runs: i64, balls: i64) -> f64 {
    if balls > 0 {
        runs as f64 / balls as f64 * 100.0
    } else {
        0.0
    }
}

fn economy(runs: i64, balls: i64) -> f64 {
    if balls > 0 {
        runs as f64 * 6.0 / balls as f64
    } else {
        0.0
    }
}

/// Per-match values in match order with a trailing rolling mean.
fn form_trend(per_match: &BTreeMap<i64, f64>, window: usize) -> Vec<FormPoint> {
    let window = window.max(1);
    let values: Vec<f64> = per_match.values().copied().collect();

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            let rolling = slice.iter().sum::<f64>() / slice.len() as f64;
            FormPoint {
                match_index: i,
                value,
                rolling,
            }
        })
        .collect()
}

/// Batting profile for `player` over the given delivery rows.
pub fn batting_profile(
    deliveries: &DataFrame,
    player: &str,
    rolling_window: usize,
) -> Result<BattingProfile, QueryError> {
    let df = deliveries
        .clone()
        .lazy()
        .filter(col("batter").eq(lit(player)))
        .collect()?;

    let match_id = df.column("match_id")?.i64()?;
    let over = df.column("over")?.i64()?;
    let batsman_runs = df.column("batsman_runs")?.i64()?;

    let mut profile = BattingProfile {
        player: player.to_string(),
        ..BattingProfile::default()
    };
    let mut per_match: BTreeMap<i64, f64> = BTreeMap::new();

    for i in 0..df.height() {
        let (Some(id), Some(ov), Some(runs)) =
            (match_id.get(i), over.get(i), batsman_runs.get(i))
        else {
            continue;
        };

        profile.runs += runs;
        profile.balls += 1;
        if runs == 4 {
            profile.fours += 1;
        } else if runs == 6 {
            profile.sixes += 1;
        }

        let split = match Phase::of_over(ov) {
            Phase::Powerplay => Some(&mut profile.powerplay),
            Phase::DeathOvers => Some(&mut profile.death),
            Phase::MiddleOvers => None,
        };
        if let Some(split) = split {
            split.runs += runs;
            split.balls += 1;
            if runs >= 4 {
                split.boundaries += 1;
            }
        }

        *per_match.entry(id).or_insert(0.0) += runs as f64;
    }

    profile.innings = per_match.len() as i64;
    profile.strike_rate = strike_rate(profile.runs, profile.balls);
    profile.powerplay.strike_rate =
        strike_rate(profile.powerplay.runs, profile.powerplay.balls);
    profile.death.strike_rate = strike_rate(profile.death.runs, profile.death.balls);
    profile.form = form_trend(&per_match, rolling_window);

    Ok(profile)
}

/// Bowling profile for `player` over the given delivery rows.
///
/// Wicket attribution matches the reference dataset's convention: every
/// wicket that falls on the player's delivery is counted. Dot balls are
/// deliveries with no runs off the bat.
pub fn bowling_profile(
    deliveries: &DataFrame,
    player: &str,
    rolling_window: usize,
) -> Result<BowlingProfile, QueryError> {
    let df = deliveries
        .clone()
        .lazy()
        .filter(col("bowler").eq(lit(player)))
        .collect()?;

    let match_id = df.column("match_id")?.i64()?;
    let over = df.column("over")?.i64()?;
    let batsman_runs = df.column("batsman_runs")?.i64()?;
    let total_runs = df.column("total_runs")?.i64()?;
    let is_wicket = df.column("is_wicket")?.i64()?;

    let mut profile = BowlingProfile {
        player: player.to_string(),
        ..BowlingProfile::default()
    };
    // Per-match (runs conceded, balls) for the economy trend.
    let mut per_match: BTreeMap<i64, (i64, i64)> = BTreeMap::new();

    for i in 0..df.height() {
        let (Some(id), Some(ov), Some(bat_runs), Some(runs), Some(wicket)) = (
            match_id.get(i),
            over.get(i),
            batsman_runs.get(i),
            total_runs.get(i),
            is_wicket.get(i),
        ) else {
            continue;
        };

        profile.balls += 1;
        profile.runs_conceded += runs;
        profile.wickets += wicket;
        if bat_runs == 0 {
            profile.dot_balls += 1;
        }

        let split = match Phase::of_over(ov) {
            Phase::Powerplay => Some(&mut profile.powerplay),
            Phase::DeathOvers => Some(&mut profile.death),
            Phase::MiddleOvers => None,
        };
        if let Some(split) = split {
            split.balls += 1;
            split.runs_conceded += runs;
            split.wickets += wicket;
            if bat_runs == 0 {
                split.dot_balls += 1;
            }
        }

        let entry = per_match.entry(id).or_insert((0, 0));
        entry.0 += runs;
        entry.1 += 1;
    }

    profile.matches = per_match.len() as i64;
    profile.economy = economy(profile.runs_conceded, profile.balls);
    profile.powerplay.economy =
        economy(profile.powerplay.runs_conceded, profile.powerplay.balls);
    profile.death.economy = economy(profile.death.runs_conceded, profile.death.balls);

    let per_match_economy: BTreeMap<i64, f64> = per_match
        .iter()
        .map(|(id, (runs, balls))| (*id, economy(*runs, *balls)))
        .collect();
    profile.form = form_trend(&per_match_economy, rolling_window);

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::fixtures;

    #[test]
    fn batting_totals_and_pressure_splits() {
        let ds = fixtures::dataset();
        let profile =
            batting_profile(ds.deliveries(), "Suryakumar Yadav", 5).unwrap();

        assert_eq!(profile.runs, 31);
        assert_eq!(profile.balls, 9);
        assert_eq!(profile.innings, 3);
        assert_eq!(profile.sixes, 4);
        assert_eq!(profile.fours, 0);
        assert!((profile.strike_rate - 31.0 / 9.0 * 100.0).abs() < 1e-9);

        // Powerplay: 23 off 6; death overs: 8 off 3 with one boundary.
        assert_eq!(profile.powerplay.runs, 23);
        assert_eq!(profile.powerplay.balls, 6);
        assert_eq!(profile.death.runs, 8);
        assert_eq!(profile.death.balls, 3);
        assert_eq!(profile.death.boundaries, 1);
    }

    #[test]
    fn batting_form_uses_rolling_window() {
        let ds = fixtures::dataset();
        let profile = batting_profile(ds.deliveries(), "MS Dhoni", 5).unwrap();

        // Dhoni: 7 in match 1, 26 in match 2.
        let values: Vec<f64> = profile.form.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![7.0, 26.0]);
        let rolling: Vec<f64> = profile.form.iter().map(|p| p.rolling).collect();
        assert_eq!(rolling, vec![7.0, 16.5]);
    }

    #[test]
    fn rolling_window_of_one_tracks_values() {
        let ds = fixtures::dataset();
        let profile = batting_profile(ds.deliveries(), "MS Dhoni", 1).unwrap();
        for point in &profile.form {
            assert_eq!(point.value, point.rolling);
        }
    }

    #[test]
    fn bowling_totals_and_economy() {
        let ds = fixtures::dataset();
        let profile =
            bowling_profile(ds.deliveries(), "Jasprit Bumrah", 5).unwrap();

        assert_eq!(profile.balls, 11);
        assert_eq!(profile.runs_conceded, 36);
        assert_eq!(profile.wickets, 2);
        assert_eq!(profile.dot_balls, 3);
        assert_eq!(profile.matches, 3);
        assert!((profile.economy - 36.0 * 6.0 / 11.0).abs() < 1e-9);

        // Death overs: match 2's 18th over, 12 conceded off 2.
        assert_eq!(profile.death.balls, 2);
        assert_eq!(profile.death.runs_conceded, 12);
        assert!((profile.death.economy - 36.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_player_yields_empty_profile() {
        let ds = fixtures::dataset();
        let batting =
            batting_profile(ds.deliveries(), "Nonexistent Player", 5).unwrap();
        assert_eq!(batting.runs, 0);
        assert_eq!(batting.balls, 0);
        assert_eq!(batting.innings, 0);
        assert!(batting.form.is_empty());
        assert_eq!(batting.strike_rate, 0.0);

        let bowling =
            bowling_profile(ds.deliveries(), "Nonexistent Player", 5).unwrap();
        assert_eq!(bowling.wickets, 0);
        assert!(bowling.form.is_empty());
    }
}
