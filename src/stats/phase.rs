//! Phase specialists: who scores fastest and who concedes least in each
//! segment of an innings.

use polars::prelude::*;
use rayon::prelude::*;
use std::cmp::Ordering;

use super::QueryError;
use crate::data::Phase;

/// One ranked player within a phase. `rate` is a strike rate for batters and
/// an economy for bowlers; `volume` the matching count (runs or wickets).
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialistRow {
    pub name: String,
    pub rate: f64,
    pub volume: i64,
    pub balls: i64,
    pub matches: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseLeaders {
    pub phase: Phase,
    pub batting: Vec<SpecialistRow>,
    pub bowling: Vec<SpecialistRow>,
}

/// Compute batting and bowling leaders for every phase, one phase per rayon
/// task. Players below `min_matches` distinct matches in a phase are not
/// ranked in it.
pub fn phase_specialists(
    deliveries: &DataFrame,
    min_matches: usize,
    limit: usize,
) -> Result<Vec<PhaseLeaders>, QueryError> {
    Phase::ALL
        .par_iter()
        .map(|phase| leaders_for_phase(deliveries, *phase, min_matches, limit))
        .collect()
}

fn leaders_for_phase(
    deliveries: &DataFrame,
    phase: Phase,
    min_matches: usize,
    limit: usize,
) -> Result<PhaseLeaders, QueryError> {
    let phase_df = deliveries
        .clone()
        .lazy()
        .filter(col("phase").eq(lit(phase.label())))
        .collect()?;

    Ok(PhaseLeaders {
        phase,
        batting: batting_leaders(&phase_df, min_matches, limit)?,
        bowling: bowling_leaders(&phase_df, min_matches, limit)?,
    })
}

fn batting_leaders(
    phase_df: &DataFrame,
    min_matches: usize,
    limit: usize,
) -> Result<Vec<SpecialistRow>, QueryError> {
    let df = phase_df
        .clone()
        .lazy()
        .group_by([col("batter")])
        .agg([
            col("batsman_runs").sum().alias("runs"),
            len().cast(DataType::Int64).alias("balls"),
            col("match_id")
                .n_unique()
                .cast(DataType::Int64)
                .alias("matches"),
        ])
        .collect()?;

    let names = df.column("batter")?.str()?;
    let runs = df.column("runs")?.i64()?;
    let balls = df.column("balls")?.i64()?;
    let matches = df.column("matches")?.i64()?;

    let mut rows: Vec<SpecialistRow> = (0..df.height())
        .filter_map(|i| {
            let m = matches.get(i)?;
            let b = balls.get(i)?;
            if m < min_matches as i64 || b == 0 {
                return None;
            }
            let r = runs.get(i)?;
            Some(SpecialistRow {
                name: names.get(i)?.to_string(),
                rate: r as f64 / b as f64 * 100.0,
                volume: r,
                balls: b,
                matches: m,
            })
        })
        .collect();

    // Strike rate: higher is better.
    rows.sort_by(|a, b| {
        b.rate
            .partial_cmp(&a.rate)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    rows.truncate(limit);
    Ok(rows)
}

fn bowling_leaders(
    phase_df: &DataFrame,
    min_matches: usize,
    limit: usize,
) -> Result<Vec<SpecialistRow>, QueryError> {
    let df = phase_df
        .clone()
        .lazy()
        .group_by([col("bowler")])
        .agg([
            col("total_runs").sum().alias("runs"),
            col("is_wicket").sum().alias("wickets"),
            len().cast(DataType::Int64).alias("balls"),
            col("match_id")
                .n_unique()
                .cast(DataType::Int64)
                .alias("matches"),
        ])
        .collect()?;

    let names = df.column("bowler")?.str()?;
    let runs = df.column("runs")?.i64()?;
    let wickets = df.column("wickets")?.i64()?;
    let balls = df.column("balls")?.i64()?;
    let matches = df.column("matches")?.i64()?;

    let mut rows: Vec<SpecialistRow> = (0..df.height())
        .filter_map(|i| {
            let m = matches.get(i)?;
            let b = balls.get(i)?;
            if m < min_matches as i64 || b == 0 {
                return None;
            }
            Some(SpecialistRow {
                name: names.get(i)?.to_string(),
                rate: runs.get(i)? as f64 * 6.0 / b as f64,
                volume: wickets.get(i)?,
                balls: b,
                matches: m,
            })
        })
        .collect();

    // Economy: lower is better.
    rows.sort_by(|a, b| {
        a.rate
            .partial_cmp(&b.rate)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    rows.truncate(limit);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::fixtures;

    #[test]
    fn powerplay_batting_leaders_ranked_by_strike_rate() {
        let ds = fixtures::dataset();
        let leaders = phase_specialists(ds.deliveries(), 1, 5).unwrap();

        assert_eq!(leaders.len(), 3);
        let pp = &leaders[0];
        assert_eq!(pp.phase, Phase::Powerplay);

        // Suryakumar: 23 off 6 in the powerplay across three matches.
        assert_eq!(pp.batting[0].name, "Suryakumar Yadav");
        assert_eq!(pp.batting[0].volume, 23);
        assert_eq!(pp.batting[0].matches, 3);
        assert!((pp.batting[0].rate - 23.0 / 6.0 * 100.0).abs() < 1e-9);

        // MS Dhoni (300.0) ahead of Rohit Sharma (250.0).
        assert_eq!(pp.batting[1].name, "MS Dhoni");
        assert_eq!(pp.batting[2].name, "Rohit Sharma");
    }

    #[test]
    fn qualification_threshold_filters_small_samples() {
        let ds = fixtures::dataset();
        let leaders = phase_specialists(ds.deliveries(), 2, 5).unwrap();

        let pp = &leaders[0];
        // Russell and Narine appear in a single match each.
        assert!(pp.batting.iter().all(|r| r.name != "Andre Russell"));
        assert!(pp.bowling.iter().all(|r| r.name != "Sunil Narine"));
    }

    #[test]
    fn bowling_leaders_prefer_lower_economy() {
        let ds = fixtures::dataset();
        let leaders = phase_specialists(ds.deliveries(), 1, 5).unwrap();

        let pp = &leaders[0];
        let rates: Vec<f64> = pp.bowling.iter().map(|r| r.rate).collect();
        let mut sorted = rates.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(rates, sorted);
    }

    #[test]
    fn phases_without_rows_yield_empty_leaderboards() {
        let ds = fixtures::dataset();
        let leaders = phase_specialists(ds.deliveries(), 1, 5).unwrap();

        // The fixture has no middle-overs bowling from Narine; the middle
        // phase still resolves, only with fewer entries.
        let middle = &leaders[1];
        assert_eq!(middle.phase, Phase::MiddleOvers);
        assert_eq!(middle.batting.len(), 1); // only Dhoni faced middle overs
        assert_eq!(middle.batting[0].name, "MS Dhoni");
    }
}
