//! The in-memory dataset.
//!
//! `Dataset` holds two immutable tables for the process lifetime: the
//! delivery-level table (one row per ball bowled) and a per-match summary
//! (season, venue, sides, winner). Everything displayed by the app is a pure
//! function of these tables plus the user's selections.

use polars::prelude::*;
use std::collections::HashMap;

use super::loader::DataError;

/// Last over of the powerplay (inclusive).
pub const POWERPLAY_LAST_OVER: i64 = 6;
/// Last over of the middle phase (inclusive); later overs are the death.
pub const MIDDLE_LAST_OVER: i64 = 15;

/// Innings segment used to bucket performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Powerplay,
    MiddleOvers,
    DeathOvers,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Powerplay, Phase::MiddleOvers, Phase::DeathOvers];

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Powerplay => "Powerplay",
            Phase::MiddleOvers => "Middle Overs",
            Phase::DeathOvers => "Death Overs",
        }
    }

    pub fn of_over(over: i64) -> Phase {
        if over <= POWERPLAY_LAST_OVER {
            Phase::Powerplay
        } else if over <= MIDDLE_LAST_OVER {
            Phase::MiddleOvers
        } else {
            Phase::DeathOvers
        }
    }
}

/// Columns every delivery row must carry.
const REQUIRED_DELIVERY_COLUMNS: [&str; 12] = [
    "match_id",
    "inning",
    "batting_team",
    "bowling_team",
    "over",
    "ball",
    "batter",
    "bowler",
    "batsman_runs",
    "extra_runs",
    "total_runs",
    "is_wicket",
];

/// Immutable delivery table plus per-match summary.
#[derive(Debug)]
pub struct Dataset {
    deliveries: DataFrame,
    matches: DataFrame,
}

/// Per-match metadata read from `matches.csv`. A `None` field means the
/// column was absent from the file and the derived value stands.
struct MatchMeta {
    season: Option<String>,
    venue: Option<String>,
    winner: Option<String>,
}

impl Dataset {
    /// Build a dataset from raw frames: validate the delivery schema, derive
    /// the `phase` column, assemble the match summary (metadata overlaid on
    /// what the deliveries themselves imply), and stamp each delivery with
    /// its season.
    pub fn from_frames(
        deliveries: DataFrame,
        matches: Option<DataFrame>,
    ) -> Result<Dataset, DataError> {
        for name in REQUIRED_DELIVERY_COLUMNS {
            if deliveries.column(name).is_err() {
                return Err(DataError::MissingColumn { name: name.into() });
            }
        }
        if deliveries.height() == 0 {
            return Err(DataError::Empty);
        }

        let deliveries = deliveries
            .lazy()
            .with_columns([
                col("match_id").cast(DataType::Int64),
                col("inning").cast(DataType::Int64),
                col("over").cast(DataType::Int64),
                col("ball").cast(DataType::Int64),
                col("batsman_runs").cast(DataType::Int64),
                col("extra_runs").cast(DataType::Int64),
                col("total_runs").cast(DataType::Int64),
                col("is_wicket").cast(DataType::Int64),
            ])
            .with_column(phase_expr())
            .collect()?;

        let meta = matches.map(|df| read_match_meta(&df)).transpose()?;
        let matches = derive_matches(&deliveries, meta.as_ref())?;

        // The match summary is authoritative for seasons; re-stamp the
        // deliveries from it so filtering sees one vocabulary.
        let mut deliveries = deliveries;
        if deliveries.column("season").is_ok() {
            deliveries = deliveries.drop("season")?;
        }
        let deliveries = deliveries
            .lazy()
            .join(
                matches
                    .clone()
                    .lazy()
                    .select([col("match_id"), col("season")]),
                [col("match_id")],
                [col("match_id")],
                JoinArgs::new(JoinType::Left),
            )
            .collect()?;

        Ok(Dataset {
            deliveries,
            matches,
        })
    }

    /// The delivery table (one row per ball).
    pub fn deliveries(&self) -> &DataFrame {
        &self.deliveries
    }

    /// The per-match summary (`match_id, season, venue, team1, team2, winner`).
    pub fn matches(&self) -> &DataFrame {
        &self.matches
    }

    pub fn delivery_count(&self) -> usize {
        self.deliveries.height()
    }

    pub fn match_count(&self) -> usize {
        self.matches.height()
    }

    pub fn teams(&self) -> Vec<String> {
        unique_strings(&self.deliveries, "batting_team")
    }

    pub fn batters(&self) -> Vec<String> {
        unique_strings(&self.deliveries, "batter")
    }

    pub fn bowlers(&self) -> Vec<String> {
        unique_strings(&self.deliveries, "bowler")
    }

    pub fn seasons(&self) -> Vec<String> {
        unique_strings(&self.matches, "season")
    }

    /// Delivery rows restricted to the selected seasons; an empty selection
    /// means no restriction.
    pub fn deliveries_filtered(&self, seasons: &[String]) -> PolarsResult<DataFrame> {
        match season_mask(seasons) {
            None => Ok(self.deliveries.clone()),
            Some(mask) => self.deliveries.clone().lazy().filter(mask).collect(),
        }
    }

    /// Match summary rows restricted to the selected seasons.
    pub fn matches_filtered(&self, seasons: &[String]) -> PolarsResult<DataFrame> {
        match season_mask(seasons) {
            None => Ok(self.matches.clone()),
            Some(mask) => self.matches.clone().lazy().filter(mask).collect(),
        }
    }
}

fn phase_expr() -> Expr {
    when(col("over").lt_eq(lit(POWERPLAY_LAST_OVER)))
        .then(lit(Phase::Powerplay.label()))
        .when(col("over").lt_eq(lit(MIDDLE_LAST_OVER)))
        .then(lit(Phase::MiddleOvers.label()))
        .otherwise(lit(Phase::DeathOvers.label()))
        .alias("phase")
}

fn season_mask(seasons: &[String]) -> Option<Expr> {
    seasons
        .iter()
        .map(|s| col("season").eq(lit(s.as_str())))
        .reduce(|a, b| a.or(b))
}

/// Unique non-empty values of a string column, sorted for stable display.
fn unique_strings(df: &DataFrame, column: &str) -> Vec<String> {
    df.column(column)
        .ok()
        .and_then(|col| col.unique().ok())
        .map(|unique| {
            let series = unique.as_materialized_series();
            let mut values: Vec<String> = (0..series.len())
                .filter_map(|i| {
                    let val = series.get(i).ok()?;
                    if val.is_null() {
                        None
                    } else {
                        Some(val.to_string().trim_matches('"').to_string())
                    }
                })
                .filter(|v| !v.is_empty())
                .collect();
            values.sort();
            values
        })
        .unwrap_or_default()
}

/// Read per-match metadata into a map keyed by match id. Accepts either
/// `match_id` or the reference file's `id` header; season/venue/winner are
/// each optional columns.
fn read_match_meta(df: &DataFrame) -> Result<HashMap<i64, MatchMeta>, DataError> {
    let id_name = if df.column("match_id").is_ok() {
        "match_id"
    } else if df.column("id").is_ok() {
        "id"
    } else {
        return Err(DataError::MissingColumn {
            name: "matches: match_id".into(),
        });
    };

    let ids = df.column(id_name)?.cast(&DataType::Int64)?;
    let ids = ids.i64()?;

    let string_col = |name: &str| -> Result<Option<StringChunked>, DataError> {
        match df.column(name) {
            Ok(col) => Ok(Some(col.cast(&DataType::String)?.str()?.clone())),
            Err(_) => Ok(None),
        }
    };
    let seasons = string_col("season")?;
    let venues = string_col("venue")?;
    let winners = string_col("winner")?;

    let get = |ca: &Option<StringChunked>, i: usize| -> Option<String> {
        ca.as_ref()
            .map(|ca| ca.get(i).unwrap_or("").to_string())
    };

    let mut meta = HashMap::with_capacity(df.height());
    for i in 0..df.height() {
        let Some(id) = ids.get(i) else {
            continue;
        };
        meta.insert(
            id,
            MatchMeta {
                season: get(&seasons, i),
                venue: get(&venues, i),
                winner: get(&winners, i),
            },
        );
    }
    Ok(meta)
}

/// Build the match summary from the deliveries, overlaying file metadata
/// where present. Without metadata the winner is the side with the higher
/// run total (equal totals count as no result) and the season comes from the
/// deliveries' own `season` column when one exists.
fn derive_matches(
    deliveries: &DataFrame,
    meta: Option<&HashMap<i64, MatchMeta>>,
) -> Result<DataFrame, DataError> {
    let match_id = deliveries.column("match_id")?.i64()?;
    let inning = deliveries.column("inning")?.i64()?;
    let batting = deliveries.column("batting_team")?.str()?;
    let bowling = deliveries.column("bowling_team")?.str()?;
    let total_runs = deliveries.column("total_runs")?.i64()?;
    let season = match deliveries.column("season") {
        Ok(col) => Some(col.cast(&DataType::String)?.str()?.clone()),
        Err(_) => None,
    };

    struct Accum {
        team1: String,
        team2: String,
        season: String,
        runs1: i64,
        runs2: i64,
    }

    let mut order: Vec<i64> = Vec::new();
    let mut accum: HashMap<i64, Accum> = HashMap::new();

    for i in 0..deliveries.height() {
        let (Some(id), Some(inning), Some(batting), Some(bowling), Some(runs)) = (
            match_id.get(i),
            inning.get(i),
            batting.get(i),
            bowling.get(i),
            total_runs.get(i),
        ) else {
            continue;
        };

        let entry = accum.entry(id).or_insert_with(|| {
            order.push(id);
            // First delivery seen decides the sides: whoever bats in the
            // first innings is team1.
            let (team1, team2) = if inning <= 1 {
                (batting.to_string(), bowling.to_string())
            } else {
                (bowling.to_string(), batting.to_string())
            };
            Accum {
                team1,
                team2,
                season: season
                    .as_ref()
                    .and_then(|ca| ca.get(i))
                    .unwrap_or("")
                    .to_string(),
                runs1: 0,
                runs2: 0,
            }
        });

        if batting == entry.team1 {
            entry.runs1 += runs;
        } else {
            entry.runs2 += runs;
        }
    }

    let mut ids = Vec::with_capacity(order.len());
    let mut seasons = Vec::with_capacity(order.len());
    let mut venues = Vec::with_capacity(order.len());
    let mut team1s = Vec::with_capacity(order.len());
    let mut team2s = Vec::with_capacity(order.len());
    let mut winners = Vec::with_capacity(order.len());

    for id in order {
        let Some(acc) = accum.remove(&id) else {
            continue;
        };
        let derived_winner = if acc.runs1 > acc.runs2 {
            acc.team1.clone()
        } else if acc.runs2 > acc.runs1 {
            acc.team2.clone()
        } else {
            String::new()
        };

        let m = meta.and_then(|m| m.get(&id));
        ids.push(id);
        seasons.push(
            m.and_then(|m| m.season.clone())
                .unwrap_or(acc.season.clone()),
        );
        venues.push(m.and_then(|m| m.venue.clone()).unwrap_or_default());
        winners.push(m.and_then(|m| m.winner.clone()).unwrap_or(derived_winner));
        team1s.push(acc.team1);
        team2s.push(acc.team2);
    }

    let df = DataFrame::new(vec![
        Column::new("match_id".into(), ids),
        Column::new("season".into(), seasons),
        Column::new("venue".into(), venues),
        Column::new("team1".into(), team1s),
        Column::new("team2".into(), team2s),
        Column::new("winner".into(), winners),
    ])?;
    Ok(df)
}
