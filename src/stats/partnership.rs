//! Batting partnership analysis.
//!
//! The dataset does not identify the non-striker on every row, so a
//! partnership is tracked by batter appearance within an innings: the two
//! batters most recently seen form the current pair, a wicket closes it, and
//! an open pair is closed when its innings ends.

use polars::prelude::*;

use super::QueryError;

#[derive(Debug, Clone, PartialEq)]
pub struct Partnership {
    pub match_id: i64,
    /// Alphabetically ordered pair.
    pub batters: (String, String),
    /// Runs off the bat while the pair was together.
    pub runs: i64,
    pub balls: i64,
    pub batting_team: String,
    pub bowling_team: String,
}

struct OpenStand {
    match_id: i64,
    inning: i64,
    partners: Vec<String>,
    runs: i64,
    balls: i64,
    batting_team: String,
    bowling_team: String,
}

impl OpenStand {
    fn close_into(&mut self, out: &mut Vec<Partnership>) {
        if self.partners.len() == 2 && self.balls > 0 {
            let mut pair = [self.partners[0].clone(), self.partners[1].clone()];
            pair.sort();
            let [first, second] = pair;
            out.push(Partnership {
                match_id: self.match_id,
                batters: (first, second),
                runs: self.runs,
                balls: self.balls,
                batting_team: self.batting_team.clone(),
                bowling_team: self.bowling_team.clone(),
            });
        }
        self.runs = 0;
        self.balls = 0;
    }
}

/// The highest-scoring partnerships across the given deliveries.
pub fn top_partnerships(
    deliveries: &DataFrame,
    limit: usize,
) -> Result<Vec<Partnership>, QueryError> {
    let match_id = deliveries.column("match_id")?.i64()?;
    let inning = deliveries.column("inning")?.i64()?;
    let batting_team = deliveries.column("batting_team")?.str()?;
    let bowling_team = deliveries.column("bowling_team")?.str()?;
    let batter = deliveries.column("batter")?.str()?;
    let batsman_runs = deliveries.column("batsman_runs")?.i64()?;
    let is_wicket = deliveries.column("is_wicket")?.i64()?;

    let mut stands: Vec<Partnership> = Vec::new();
    let mut open: Option<OpenStand> = None;

    for i in 0..deliveries.height() {
        let (Some(id), Some(inn), Some(bat_team), Some(bowl_team), Some(name), Some(runs), Some(wicket)) = (
            match_id.get(i),
            inning.get(i),
            batting_team.get(i),
            bowling_team.get(i),
            batter.get(i),
            batsman_runs.get(i),
            is_wicket.get(i),
        ) else {
            continue;
        };

        // Innings boundary: close whatever was still together.
        if open
            .as_ref()
            .is_some_and(|s| s.match_id != id || s.inning != inn)
        {
            if let Some(mut stand) = open.take() {
                stand.close_into(&mut stands);
            }
        }

        let stand = open.get_or_insert_with(|| OpenStand {
            match_id: id,
            inning: inn,
            partners: Vec::with_capacity(2),
            runs: 0,
            balls: 0,
            batting_team: bat_team.to_string(),
            bowling_team: bowl_team.to_string(),
        });

        if !stand.partners.iter().any(|p| p == name) {
            if stand.partners.len() < 2 {
                stand.partners.push(name.to_string());
            } else {
                // A third batter without a recorded wicket; start over.
                stand.close_into(&mut stands);
                stand.partners = vec![name.to_string()];
            }
        }

        if stand.partners.len() == 2 {
            stand.runs += runs;
            stand.balls += 1;
        }

        if wicket == 1 {
            stand.close_into(&mut stands);
            stand.partners = vec![name.to_string()];
        }
    }

    if let Some(mut stand) = open.take() {
        stand.close_into(&mut stands);
    }

    stands.sort_by(|a, b| {
        b.runs
            .cmp(&a.runs)
            .then_with(|| a.batters.cmp(&b.batters))
            .then_with(|| a.match_id.cmp(&b.match_id))
    });
    stands.truncate(limit);
    Ok(stands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::fixtures::{self, CSK, MI};

    #[test]
    fn ranks_partnerships_by_runs() {
        let ds = fixtures::dataset();
        let stands = top_partnerships(ds.deliveries(), 10).unwrap();

        // Match 1: Rohit-Suryakumar add 9 together after the wicket;
        // match 2: the appearance-based pair adds 4.
        assert_eq!(stands.len(), 2);
        let top = &stands[0];
        assert_eq!(
            top.batters,
            ("Rohit Sharma".to_string(), "Suryakumar Yadav".to_string())
        );
        assert_eq!(top.runs, 9);
        assert_eq!(top.balls, 4);
        assert_eq!(top.match_id, 1);
        assert_eq!(top.batting_team, MI);
        assert_eq!(top.bowling_team, CSK);

        assert_eq!(stands[1].runs, 4);
        assert_eq!(stands[1].match_id, 2);
    }

    #[test]
    fn limit_truncates_the_listing() {
        let ds = fixtures::dataset();
        let stands = top_partnerships(ds.deliveries(), 1).unwrap();
        assert_eq!(stands.len(), 1);
        assert_eq!(stands[0].runs, 9);
    }

    #[test]
    fn single_batter_innings_produce_no_partnership() {
        let ds = fixtures::dataset();
        let stands = top_partnerships(ds.deliveries(), 10).unwrap();
        // Matches 1 (innings 2) and 3 feature lone batters only.
        assert!(stands.iter().all(|s| s.match_id != 3));
    }
}
