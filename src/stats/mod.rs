//! Aggregation layer.
//!
//! Every query here is a stateless pure function: delivery table (plus match
//! summary where needed) and selection parameters in, a small result struct
//! out. Selections that match nothing produce empty results, never errors.

pub mod head_to_head;
pub mod matchup;
pub mod partnership;
pub mod phase;
pub mod player;
pub mod records;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("aggregation failed: {0}")]
    Polars(#[from] PolarsError),
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::data::Dataset;
    use polars::prelude::*;

    pub const MI: &str = "Mumbai Indians";
    pub const CSK: &str = "Chennai Super Kings";
    pub const KKR: &str = "Kolkata Knight Riders";

    /// match_id, inning, batting team, bowling team, over, ball, batter,
    /// bowler, batsman runs, extra runs, total runs, wicket, season
    type Row = (
        i64,
        i64,
        &'static str,
        &'static str,
        i64,
        i64,
        &'static str,
        &'static str,
        i64,
        i64,
        i64,
        i64,
        &'static str,
    );

    /// Three matches across two seasons.
    ///
    /// Match 1 (2023): MI 19 beat CSK 8.
    /// Match 2 (2024): CSK 26 beat MI 4.
    /// Match 3 (2024): MI 18 beat KKR 2.
    const ROWS: &[Row] = &[
        // Match 1, innings 1: MI bat, Chahar bowls.
        (1, 1, MI, CSK, 1, 1, "Rohit Sharma", "Deepak Chahar", 4, 0, 4, 0, "2023"),
        (1, 1, MI, CSK, 1, 2, "Rohit Sharma", "Deepak Chahar", 6, 0, 6, 0, "2023"),
        (1, 1, MI, CSK, 1, 3, "Rohit Sharma", "Deepak Chahar", 0, 0, 0, 1, "2023"),
        (1, 1, MI, CSK, 1, 4, "Suryakumar Yadav", "Deepak Chahar", 1, 0, 1, 0, "2023"),
        (1, 1, MI, CSK, 16, 1, "Suryakumar Yadav", "Deepak Chahar", 6, 0, 6, 0, "2023"),
        (1, 1, MI, CSK, 16, 2, "Suryakumar Yadav", "Deepak Chahar", 0, 0, 0, 0, "2023"),
        (1, 1, MI, CSK, 16, 3, "Suryakumar Yadav", "Deepak Chahar", 2, 0, 2, 0, "2023"),
        // Match 1, innings 2: CSK chase, Bumrah bowls. One wide.
        (1, 2, CSK, MI, 1, 1, "MS Dhoni", "Jasprit Bumrah", 1, 0, 1, 0, "2023"),
        (1, 2, CSK, MI, 1, 2, "MS Dhoni", "Jasprit Bumrah", 0, 1, 1, 0, "2023"),
        (1, 2, CSK, MI, 10, 1, "MS Dhoni", "Jasprit Bumrah", 6, 0, 6, 0, "2023"),
        (1, 2, CSK, MI, 10, 2, "MS Dhoni", "Jasprit Bumrah", 0, 0, 0, 1, "2023"),
        // Match 2, innings 1: CSK bat, Bumrah bowls.
        (2, 1, CSK, MI, 1, 1, "MS Dhoni", "Jasprit Bumrah", 4, 0, 4, 0, "2024"),
        (2, 1, CSK, MI, 1, 2, "MS Dhoni", "Jasprit Bumrah", 4, 0, 4, 0, "2024"),
        (2, 1, CSK, MI, 1, 3, "MS Dhoni", "Jasprit Bumrah", 6, 0, 6, 0, "2024"),
        (2, 1, CSK, MI, 18, 1, "MS Dhoni", "Jasprit Bumrah", 6, 0, 6, 0, "2024"),
        (2, 1, CSK, MI, 18, 2, "MS Dhoni", "Jasprit Bumrah", 6, 0, 6, 0, "2024"),
        // Match 2, innings 2: MI chase, Chahar bowls.
        (2, 2, MI, CSK, 1, 1, "Rohit Sharma", "Deepak Chahar", 0, 0, 0, 1, "2024"),
        (2, 2, MI, CSK, 1, 2, "Suryakumar Yadav", "Deepak Chahar", 2, 0, 2, 0, "2024"),
        (2, 2, MI, CSK, 1, 3, "Suryakumar Yadav", "Deepak Chahar", 2, 0, 2, 0, "2024"),
        // Match 3, innings 1: MI bat, Narine bowls.
        (3, 1, MI, KKR, 1, 1, "Suryakumar Yadav", "Sunil Narine", 6, 0, 6, 0, "2024"),
        (3, 1, MI, KKR, 1, 2, "Suryakumar Yadav", "Sunil Narine", 6, 0, 6, 0, "2024"),
        (3, 1, MI, KKR, 1, 3, "Suryakumar Yadav", "Sunil Narine", 6, 0, 6, 0, "2024"),
        // Match 3, innings 2: KKR chase, Bumrah bowls.
        (3, 2, KKR, MI, 1, 1, "Andre Russell", "Jasprit Bumrah", 2, 0, 2, 0, "2024"),
        (3, 2, KKR, MI, 1, 2, "Andre Russell", "Jasprit Bumrah", 0, 0, 0, 1, "2024"),
    ];

    pub fn dataset() -> Dataset {
        let df = DataFrame::new(vec![
            Column::new("match_id".into(), ROWS.iter().map(|r| r.0).collect::<Vec<_>>()),
            Column::new("inning".into(), ROWS.iter().map(|r| r.1).collect::<Vec<_>>()),
            Column::new(
                "batting_team".into(),
                ROWS.iter().map(|r| r.2).collect::<Vec<_>>(),
            ),
            Column::new(
                "bowling_team".into(),
                ROWS.iter().map(|r| r.3).collect::<Vec<_>>(),
            ),
            Column::new("over".into(), ROWS.iter().map(|r| r.4).collect::<Vec<_>>()),
            Column::new("ball".into(), ROWS.iter().map(|r| r.5).collect::<Vec<_>>()),
            Column::new("batter".into(), ROWS.iter().map(|r| r.6).collect::<Vec<_>>()),
            Column::new("bowler".into(), ROWS.iter().map(|r| r.7).collect::<Vec<_>>()),
            Column::new(
                "batsman_runs".into(),
                ROWS.iter().map(|r| r.8).collect::<Vec<_>>(),
            ),
            Column::new(
                "extra_runs".into(),
                ROWS.iter().map(|r| r.9).collect::<Vec<_>>(),
            ),
            Column::new(
                "total_runs".into(),
                ROWS.iter().map(|r| r.10).collect::<Vec<_>>(),
            ),
            Column::new(
                "is_wicket".into(),
                ROWS.iter().map(|r| r.11).collect::<Vec<_>>(),
            ),
            Column::new("season".into(), ROWS.iter().map(|r| r.12).collect::<Vec<_>>()),
        ])
        .unwrap();

        Dataset::from_frames(df, None).unwrap()
    }
}
