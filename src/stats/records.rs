//! Milestone and record listings.
//!
//! Each category is one filter + sort + limit pipeline over the delivery
//! table or a match/innings-level rollup of it. Ordering is deterministic:
//! the ranking metric first, then name ascending, then match id where a
//! per-match record can still tie.

use polars::prelude::*;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordCategory {
    FastestFifty,
    FastestCentury,
    MostSixes,
    MostFours,
    MostCenturies,
    MostFifties,
    BestBowlingFigures,
    MostWickets,
    BestEconomy,
    FiveWicketHauls,
    HighestTeamTotal,
    BestTeamStrikeRate,
    MostTeamWins,
}

impl RecordCategory {
    pub const ALL: [RecordCategory; 13] = [
        RecordCategory::FastestFifty,
        RecordCategory::FastestCentury,
        RecordCategory::MostSixes,
        RecordCategory::MostFours,
        RecordCategory::MostCenturies,
        RecordCategory::MostFifties,
        RecordCategory::BestBowlingFigures,
        RecordCategory::MostWickets,
        RecordCategory::BestEconomy,
        RecordCategory::FiveWicketHauls,
        RecordCategory::HighestTeamTotal,
        RecordCategory::BestTeamStrikeRate,
        RecordCategory::MostTeamWins,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RecordCategory::FastestFifty => "Fastest Fifty",
            RecordCategory::FastestCentury => "Fastest Century",
            RecordCategory::MostSixes => "Most Sixes",
            RecordCategory::MostFours => "Most Fours",
            RecordCategory::MostCenturies => "Most Centuries",
            RecordCategory::MostFifties => "Most Fifties",
            RecordCategory::BestBowlingFigures => "Best Bowling Figures",
            RecordCategory::MostWickets => "Most Wickets",
            RecordCategory::BestEconomy => "Best Economy",
            RecordCategory::FiveWicketHauls => "Five-Wicket Hauls",
            RecordCategory::HighestTeamTotal => "Highest Team Total",
            RecordCategory::BestTeamStrikeRate => "Best Team Strike Rate",
            RecordCategory::MostTeamWins => "Most Team Wins",
        }
    }

    /// Header for the value column of the listing.
    pub fn value_label(&self) -> &'static str {
        match self {
            RecordCategory::FastestFifty | RecordCategory::FastestCentury => "Balls",
            RecordCategory::MostSixes => "Sixes",
            RecordCategory::MostFours => "Fours",
            RecordCategory::MostCenturies => "Centuries",
            RecordCategory::MostFifties => "Fifties",
            RecordCategory::BestBowlingFigures | RecordCategory::MostWickets => "Wickets",
            RecordCategory::BestEconomy => "Economy",
            RecordCategory::FiveWicketHauls => "Hauls",
            RecordCategory::HighestTeamTotal => "Runs",
            RecordCategory::BestTeamStrikeRate => "Strike Rate",
            RecordCategory::MostTeamWins => "Wins",
        }
    }

    /// Whether the value column is a rate rather than a count.
    pub fn is_rate(&self) -> bool {
        matches!(
            self,
            RecordCategory::BestEconomy | RecordCategory::BestTeamStrikeRate
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordRow {
    pub name: String,
    pub value: f64,
    /// Free-form context shown next to the value ("4/12 vs ...", "3 matches").
    pub context: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    pub category: RecordCategory,
    pub rows: Vec<RecordRow>,
}

#[derive(Debug, Clone)]
pub struct RecordParams {
    pub limit: usize,
    /// Minimum distinct matches before a player enters rate-based rankings.
    pub min_qualifying_matches: usize,
}

/// Compute the listing for one category.
pub fn record_table(
    deliveries: &DataFrame,
    matches: &DataFrame,
    category: RecordCategory,
    params: &RecordParams,
) -> Result<RecordTable, QueryError> {
    let rows = match category {
        RecordCategory::FastestFifty => fastest_to(deliveries, 50, params.limit)?,
        RecordCategory::FastestCentury => fastest_to(deliveries, 100, params.limit)?,
        RecordCategory::MostSixes => boundary_counts(deliveries, 6, params.limit)?,
        RecordCategory::MostFours => boundary_counts(deliveries, 4, params.limit)?,
        RecordCategory::MostCenturies => score_counts(deliveries, 100, i64::MAX, params.limit)?,
        RecordCategory::MostFifties => score_counts(deliveries, 50, 99, params.limit)?,
        RecordCategory::BestBowlingFigures => best_bowling_figures(deliveries, params.limit)?,
        RecordCategory::MostWickets => most_wickets(deliveries, params.limit)?,
        RecordCategory::BestEconomy => best_economy(deliveries, params)?,
        RecordCategory::FiveWicketHauls => five_wicket_hauls(deliveries, params.limit)?,
        RecordCategory::HighestTeamTotal => highest_team_total(deliveries, params.limit)?,
        RecordCategory::BestTeamStrikeRate => best_team_strike_rate(deliveries, params.limit)?,
        RecordCategory::MostTeamWins => most_team_wins(matches, params.limit)?,
    };
    Ok(RecordTable { category, rows })
}

/// Compute every category, in parallel.
pub fn compute_all(
    deliveries: &DataFrame,
    matches: &DataFrame,
    params: &RecordParams,
) -> Result<Vec<RecordTable>, QueryError> {
    RecordCategory::ALL
        .par_iter()
        .map(|category| record_table(deliveries, matches, *category, params))
        .collect()
}

/// Fewest balls to reach `target` runs within a single match.
fn fastest_to(
    deliveries: &DataFrame,
    target: i64,
    limit: usize,
) -> Result<Vec<RecordRow>, QueryError> {
    let match_id = deliveries.column("match_id")?.i64()?;
    let batter = deliveries.column("batter")?.str()?;
    let bowling_team = deliveries.column("bowling_team")?.str()?;
    let batsman_runs = deliveries.column("batsman_runs")?.i64()?;

    struct Progress {
        balls: i64,
        runs: i64,
        reached: Option<(i64, String)>,
    }

    let mut by_innings: HashMap<(i64, String), Progress> = HashMap::new();

    for i in 0..deliveries.height() {
        let (Some(id), Some(name), Some(against), Some(runs)) = (
            match_id.get(i),
            batter.get(i),
            bowling_team.get(i),
            batsman_runs.get(i),
        ) else {
            continue;
        };

        let entry = by_innings
            .entry((id, name.to_string()))
            .or_insert(Progress {
                balls: 0,
                runs: 0,
                reached: None,
            });
        entry.balls += 1;
        entry.runs += runs;
        if entry.reached.is_none() && entry.runs >= target {
            entry.reached = Some((entry.balls, against.to_string()));
        }
    }

    let mut hits: Vec<(i64, String, i64, String)> = by_innings
        .into_iter()
        .filter_map(|((id, name), progress)| {
            progress
                .reached
                .map(|(balls, against)| (balls, name, id, against))
        })
        .collect();
    hits.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    Ok(hits
        .into_iter()
        .take(limit)
        .map(|(balls, name, _, against)| RecordRow {
            name,
            value: balls as f64,
            context: format!("vs {against}"),
        })
        .collect())
}

/// Count of deliveries scoring exactly `value` runs off the bat, per batter.
fn boundary_counts(
    deliveries: &DataFrame,
    value: i64,
    limit: usize,
) -> Result<Vec<RecordRow>, QueryError> {
    let df = deliveries
        .clone()
        .lazy()
        .group_by([col("batter")])
        .agg([col("batsman_runs")
            .eq(lit(value))
            .sum()
            .cast(DataType::Int64)
            .alias("count")])
        .filter(col("count").gt(lit(0)))
        .sort(
            ["count", "batter"],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .limit(limit as u32)
        .collect()?;

    let names = df.column("batter")?.str()?;
    let counts = df.column("count")?.i64()?;
    Ok((0..df.height())
        .filter_map(|i| {
            Some(RecordRow {
                name: names.get(i)?.to_string(),
                value: counts.get(i)? as f64,
                context: String::new(),
            })
        })
        .collect())
}

/// Count of match scores within `lo..=hi` per batter.
fn score_counts(
    deliveries: &DataFrame,
    lo: i64,
    hi: i64,
    limit: usize,
) -> Result<Vec<RecordRow>, QueryError> {
    let totals = deliveries
        .clone()
        .lazy()
        .group_by([col("match_id"), col("batter")])
        .agg([col("batsman_runs").sum().alias("runs")])
        .collect()?;

    let batter = totals.column("batter")?.str()?;
    let runs = totals.column("runs")?.i64()?;

    let mut counts: HashMap<String, i64> = HashMap::new();
    for i in 0..totals.height() {
        let (Some(name), Some(r)) = (batter.get(i), runs.get(i)) else {
            continue;
        };
        if r >= lo && r <= hi {
            *counts.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<RecordRow> = counts
        .into_iter()
        .map(|(name, count)| RecordRow {
            name,
            value: count as f64,
            context: String::new(),
        })
        .collect();
    sort_desc(&mut rows);
    rows.truncate(limit);
    Ok(rows)
}

/// Best single-match bowling figures: wickets descending, then runs conceded
/// ascending.
fn best_bowling_figures(
    deliveries: &DataFrame,
    limit: usize,
) -> Result<Vec<RecordRow>, QueryError> {
    let per_match = bowler_match_figures(deliveries)?;

    let bowler = per_match.column("bowler")?.str()?;
    let match_id = per_match.column("match_id")?.i64()?;
    let wickets = per_match.column("wickets")?.i64()?;
    let runs = per_match.column("runs")?.i64()?;
    let against = per_match.column("against")?.str()?;

    let mut figures: Vec<(i64, i64, String, i64, String)> = (0..per_match.height())
        .filter_map(|i| {
            let w = wickets.get(i)?;
            if w == 0 {
                return None;
            }
            Some((
                w,
                runs.get(i)?,
                bowler.get(i)?.to_string(),
                match_id.get(i)?,
                against.get(i)?.to_string(),
            ))
        })
        .collect();
    figures.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then(a.1.cmp(&b.1))
            .then(a.2.cmp(&b.2))
            .then(a.3.cmp(&b.3))
    });

    Ok(figures
        .into_iter()
        .take(limit)
        .map(|(w, r, name, _, against)| RecordRow {
            name,
            value: w as f64,
            context: format!("{w}/{r} vs {against}"),
        })
        .collect())
}

fn most_wickets(deliveries: &DataFrame, limit: usize) -> Result<Vec<RecordRow>, QueryError> {
    let df = deliveries
        .clone()
        .lazy()
        .group_by([col("bowler")])
        .agg([col("is_wicket").sum().alias("wickets")])
        .filter(col("wickets").gt(lit(0)))
        .sort(
            ["wickets", "bowler"],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .limit(limit as u32)
        .collect()?;

    let names = df.column("bowler")?.str()?;
    let wickets = df.column("wickets")?.i64()?;
    Ok((0..df.height())
        .filter_map(|i| {
            Some(RecordRow {
                name: names.get(i)?.to_string(),
                value: wickets.get(i)? as f64,
                context: String::new(),
            })
        })
        .collect())
}

/// Career economy, ascending, for bowlers with enough matches.
fn best_economy(
    deliveries: &DataFrame,
    params: &RecordParams,
) -> Result<Vec<RecordRow>, QueryError> {
    let df = deliveries
        .clone()
        .lazy()
        .group_by([col("bowler")])
        .agg([
            col("total_runs").sum().alias("runs"),
            len().cast(DataType::Int64).alias("balls"),
            col("match_id")
                .n_unique()
                .cast(DataType::Int64)
                .alias("matches"),
        ])
        .collect()?;

    let names = df.column("bowler")?.str()?;
    let runs = df.column("runs")?.i64()?;
    let balls = df.column("balls")?.i64()?;
    let matches = df.column("matches")?.i64()?;

    let mut rows: Vec<RecordRow> = (0..df.height())
        .filter_map(|i| {
            let m = matches.get(i)?;
            let b = balls.get(i)?;
            if m < params.min_qualifying_matches as i64 || b == 0 {
                return None;
            }
            Some(RecordRow {
                name: names.get(i)?.to_string(),
                value: runs.get(i)? as f64 * 6.0 / b as f64,
                context: format!("{m} matches"),
            })
        })
        .collect();
    sort_asc(&mut rows);
    rows.truncate(params.limit);
    Ok(rows)
}

fn five_wicket_hauls(
    deliveries: &DataFrame,
    limit: usize,
) -> Result<Vec<RecordRow>, QueryError> {
    let per_match = bowler_match_figures(deliveries)?;

    let bowler = per_match.column("bowler")?.str()?;
    let wickets = per_match.column("wickets")?.i64()?;

    let mut counts: HashMap<String, i64> = HashMap::new();
    for i in 0..per_match.height() {
        let (Some(name), Some(w)) = (bowler.get(i), wickets.get(i)) else {
            continue;
        };
        if w >= 5 {
            *counts.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<RecordRow> = counts
        .into_iter()
        .map(|(name, count)| RecordRow {
            name,
            value: count as f64,
            context: String::new(),
        })
        .collect();
    sort_desc(&mut rows);
    rows.truncate(limit);
    Ok(rows)
}

fn highest_team_total(
    deliveries: &DataFrame,
    limit: usize,
) -> Result<Vec<RecordRow>, QueryError> {
    let df = deliveries
        .clone()
        .lazy()
        .group_by([col("match_id"), col("inning"), col("batting_team")])
        .agg([
            col("total_runs").sum().alias("total"),
            col("bowling_team").first().alias("against"),
        ])
        .collect()?;

    let team = df.column("batting_team")?.str()?;
    let match_id = df.column("match_id")?.i64()?;
    let total = df.column("total")?.i64()?;
    let against = df.column("against")?.str()?;

    let mut totals: Vec<(i64, String, i64, String)> = (0..df.height())
        .filter_map(|i| {
            Some((
                total.get(i)?,
                team.get(i)?.to_string(),
                match_id.get(i)?,
                against.get(i)?.to_string(),
            ))
        })
        .collect();
    totals.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    Ok(totals
        .into_iter()
        .take(limit)
        .map(|(total, name, _, against)| RecordRow {
            name,
            value: total as f64,
            context: format!("vs {against}"),
        })
        .collect())
}

fn best_team_strike_rate(
    deliveries: &DataFrame,
    limit: usize,
) -> Result<Vec<RecordRow>, QueryError> {
    let df = deliveries
        .clone()
        .lazy()
        .group_by([col("batting_team")])
        .agg([
            col("batsman_runs").sum().alias("runs"),
            len().cast(DataType::Int64).alias("balls"),
        ])
        .collect()?;

    let team = df.column("batting_team")?.str()?;
    let runs = df.column("runs")?.i64()?;
    let balls = df.column("balls")?.i64()?;

    let mut rows: Vec<RecordRow> = (0..df.height())
        .filter_map(|i| {
            let b = balls.get(i)?;
            if b == 0 {
                return None;
            }
            let r = runs.get(i)?;
            Some(RecordRow {
                name: team.get(i)?.to_string(),
                value: r as f64 / b as f64 * 100.0,
                context: format!("{r} runs off {b} balls"),
            })
        })
        .collect();
    sort_desc(&mut rows);
    rows.truncate(limit);
    Ok(rows)
}

fn most_team_wins(matches: &DataFrame, limit: usize) -> Result<Vec<RecordRow>, QueryError> {
    let winner = matches.column("winner")?.str()?;

    let mut counts: HashMap<String, i64> = HashMap::new();
    for i in 0..matches.height() {
        let Some(w) = winner.get(i) else {
            continue;
        };
        if w.is_empty() {
            continue;
        }
        *counts.entry(w.to_string()).or_insert(0) += 1;
    }

    let mut rows: Vec<RecordRow> = counts
        .into_iter()
        .map(|(name, count)| RecordRow {
            name,
            value: count as f64,
            context: String::new(),
        })
        .collect();
    sort_desc(&mut rows);
    rows.truncate(limit);
    Ok(rows)
}

/// Per-match bowling figures rollup shared by two categories.
fn bowler_match_figures(deliveries: &DataFrame) -> Result<DataFrame, QueryError> {
    Ok(deliveries
        .clone()
        .lazy()
        .group_by([col("match_id"), col("bowler")])
        .agg([
            col("is_wicket").sum().alias("wickets"),
            col("total_runs").sum().alias("runs"),
            col("batting_team").first().alias("against"),
        ])
        .collect()?)
}

fn sort_desc(rows: &mut [RecordRow]) {
    rows.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn sort_asc(rows: &mut [RecordRow]) {
    rows.sort_by(|a, b| {
        a.value
            .partial_cmp(&b.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
}
