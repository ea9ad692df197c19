//! Head to Head page: win counts, first-innings averages and phase run rates
//! for a team pair.

use egui::RichText;

use super::{empty_state, fmt_rate};
use crate::charts::ChartPlotter;
use crate::data::Phase;
use crate::stats::head_to_head::HeadToHead;

pub fn show(ui: &mut egui::Ui, data: &HeadToHead) {
    let [a, b] = &data.sides;

    ui.heading(format!("{} vs {}", a.team, b.team));
    ui.add_space(8.0);

    if data.matches == 0 {
        empty_state(ui, "These teams have not met in the selected seasons.");
        return;
    }

    ChartPlotter::draw_metric_grid(
        ui,
        "h2h_metrics",
        &[
            ("Matches", data.matches.to_string()),
            (&format!("{} wins", a.team), a.wins.to_string()),
            (&format!("{} wins", b.team), b.wins.to_string()),
            ("No result", data.no_results.to_string()),
        ],
    );

    ui.add_space(12.0);
    ui.label(RichText::new("Wins").size(14.0).strong());
    ChartPlotter::draw_ranking_bars(
        ui,
        "h2h_wins",
        &[
            (a.team.clone(), a.wins as f64),
            (b.team.clone(), b.wins as f64),
        ],
        "Wins",
        180.0,
    );

    ui.add_space(12.0);
    ui.label(
        RichText::new("Average first-innings score")
            .size(14.0)
            .strong(),
    );
    ChartPlotter::draw_metric_grid(
        ui,
        "h2h_first_innings",
        &[
            (
                &a.team,
                a.avg_first_innings
                    .map(fmt_rate)
                    .unwrap_or_else(|| "never batted first".into()),
            ),
            (
                &b.team,
                b.avg_first_innings
                    .map(fmt_rate)
                    .unwrap_or_else(|| "never batted first".into()),
            ),
        ],
    );

    ui.add_space(12.0);
    ui.label(RichText::new("Run rate by phase").size(14.0).strong());
    let labels: Vec<String> = Phase::ALL.iter().map(|p| p.label().to_string()).collect();
    let series = [
        (
            a.team.clone(),
            a.phase_rates.iter().map(|r| r.run_rate).collect::<Vec<_>>(),
        ),
        (
            b.team.clone(),
            b.phase_rates.iter().map(|r| r.run_rate).collect::<Vec<_>>(),
        ),
    ];
    ChartPlotter::draw_grouped_bars(ui, "h2h_phase_rr", &labels, &series, "Runs per over", 240.0);
}
