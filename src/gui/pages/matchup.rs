//! Matchup Analysis page: one batsman against one bowler.

use egui::RichText;

use super::{empty_state, fmt_rate};
use crate::charts::ChartPlotter;
use crate::stats::matchup::Matchup;

pub fn show(ui: &mut egui::Ui, data: &Matchup) {
    ui.heading(format!("{} vs {}", data.batter, data.bowler));
    ui.add_space(8.0);

    if data.balls == 0 {
        empty_state(ui, "These players have never faced each other in the selected seasons.");
        return;
    }

    ChartPlotter::draw_metric_grid(
        ui,
        "matchup_metrics",
        &[
            ("Balls Faced", data.balls.to_string()),
            ("Runs Scored", data.runs.to_string()),
            ("Strike Rate", fmt_rate(data.strike_rate)),
            ("Wickets", data.wickets.to_string()),
            ("Dot Balls", data.dot_balls.to_string()),
            ("Boundaries", data.boundaries.to_string()),
            ("Dismissal Rate", fmt_rate(data.dismissal_rate)),
        ],
    );

    ui.add_space(12.0);
    ui.label(RichText::new("Phase-wise matchup").size(14.0).strong());
    let rows: Vec<Vec<String>> = data
        .phases
        .iter()
        .map(|p| {
            vec![
                p.phase.label().to_string(),
                p.balls.to_string(),
                p.runs.to_string(),
                p.wickets.to_string(),
                fmt_rate(p.strike_rate),
            ]
        })
        .collect();
    ChartPlotter::draw_result_table(
        ui,
        "matchup_phases",
        &["Phase", "Balls", "Runs", "Wickets", "Strike Rate"],
        &rows,
    );

    ui.add_space(12.0);
    ui.label(RichText::new("Strike rate by phase").size(14.0).strong());
    let bars: Vec<(String, f64)> = data
        .phases
        .iter()
        .map(|p| (p.phase.label().to_string(), p.strike_rate))
        .collect();
    ChartPlotter::draw_ranking_bars(ui, "matchup_phase_sr", &bars, "Strike Rate", 220.0);
}
