//! Player Profiles page: career totals, pressure splits and form trend for
//! one batsman or bowler.

use egui::RichText;

use super::{empty_state, fmt_rate};
use crate::charts::ChartPlotter;
use crate::stats::player::{BattingProfile, BowlingProfile};

pub fn show_batting(ui: &mut egui::Ui, profile: &BattingProfile) {
    ui.heading(format!("Batting: {}", profile.player));
    ui.add_space(8.0);

    if profile.balls == 0 {
        empty_state(ui, "No deliveries faced in the selected seasons.");
        return;
    }

    ChartPlotter::draw_metric_grid(
        ui,
        "batting_metrics",
        &[
            ("Total Runs", profile.runs.to_string()),
            ("Strike Rate", fmt_rate(profile.strike_rate)),
            ("Fours", profile.fours.to_string()),
            ("Sixes", profile.sixes.to_string()),
            ("Innings", profile.innings.to_string()),
        ],
    );

    ui.add_space(12.0);
    ui.label(
        RichText::new("Performance under pressure")
            .size(14.0)
            .strong(),
    );
    ChartPlotter::draw_result_table(
        ui,
        "batting_pressure",
        &["", "Runs", "Balls", "Strike Rate", "Boundaries"],
        &[
            vec![
                "Powerplay".into(),
                profile.powerplay.runs.to_string(),
                profile.powerplay.balls.to_string(),
                fmt_rate(profile.powerplay.strike_rate),
                profile.powerplay.boundaries.to_string(),
            ],
            vec![
                "Death Overs".into(),
                profile.death.runs.to_string(),
                profile.death.balls.to_string(),
                fmt_rate(profile.death.strike_rate),
                profile.death.boundaries.to_string(),
            ],
        ],
    );

    ui.add_space(12.0);
    ui.label(RichText::new("Form").size(14.0).strong());
    ChartPlotter::draw_form_chart(
        ui,
        "batting_form",
        &profile.form,
        "Runs per match",
        "Rolling average",
        "Runs",
        260.0,
    );
}

pub fn show_bowling(ui: &mut egui::Ui, profile: &BowlingProfile) {
    ui.heading(format!("Bowling: {}", profile.player));
    ui.add_space(8.0);

    if profile.balls == 0 {
        empty_state(ui, "No deliveries bowled in the selected seasons.");
        return;
    }

    ChartPlotter::draw_metric_grid(
        ui,
        "bowling_metrics",
        &[
            ("Wickets", profile.wickets.to_string()),
            ("Economy", fmt_rate(profile.economy)),
            ("Dot Balls", profile.dot_balls.to_string()),
            ("Runs Conceded", profile.runs_conceded.to_string()),
            ("Matches", profile.matches.to_string()),
        ],
    );

    ui.add_space(12.0);
    ui.label(
        RichText::new("Performance under pressure")
            .size(14.0)
            .strong(),
    );
    ChartPlotter::draw_result_table(
        ui,
        "bowling_pressure",
        &["", "Wickets", "Balls", "Economy", "Dots"],
        &[
            vec![
                "Powerplay".into(),
                profile.powerplay.wickets.to_string(),
                profile.powerplay.balls.to_string(),
                fmt_rate(profile.powerplay.economy),
                profile.powerplay.dot_balls.to_string(),
            ],
            vec![
                "Death Overs".into(),
                profile.death.wickets.to_string(),
                profile.death.balls.to_string(),
                fmt_rate(profile.death.economy),
                profile.death.dot_balls.to_string(),
            ],
        ],
    );

    ui.add_space(12.0);
    ui.label(RichText::new("Form").size(14.0).strong());
    ChartPlotter::draw_form_chart(
        ui,
        "bowling_form",
        &profile.form,
        "Economy per match",
        "Rolling economy",
        "Economy",
        260.0,
    );
}
