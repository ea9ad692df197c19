//! Records & Statistics page: the selected milestone listing plus the
//! partnership and phase-specialist panels.

use egui::RichText;

use super::{empty_state, fmt_count, fmt_rate};
use crate::charts::ChartPlotter;
use crate::stats::partnership::Partnership;
use crate::stats::phase::PhaseLeaders;
use crate::stats::records::RecordTable;

pub fn show(
    ui: &mut egui::Ui,
    table: &RecordTable,
    partnerships: &[Partnership],
    specialists: &[PhaseLeaders],
) {
    ui.heading(table.category.label());
    ui.add_space(8.0);

    if table.rows.is_empty() {
        empty_state(ui, "No qualifying performances in the selected seasons.");
    } else {
        let fmt = if table.category.is_rate() {
            fmt_rate
        } else {
            fmt_count
        };

        let rows: Vec<Vec<String>> = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                vec![
                    (i + 1).to_string(),
                    row.name.clone(),
                    fmt(row.value),
                    row.context.clone(),
                ]
            })
            .collect();
        ChartPlotter::draw_result_table(
            ui,
            "record_table",
            &["#", "Name", table.category.value_label(), ""],
            &rows,
        );

        ui.add_space(12.0);
        let bars: Vec<(String, f64)> = table
            .rows
            .iter()
            .map(|row| (row.name.clone(), row.value))
            .collect();
        ChartPlotter::draw_ranking_bars(
            ui,
            "record_bars",
            &bars,
            table.category.value_label(),
            240.0,
        );
    }

    ui.add_space(16.0);
    egui::CollapsingHeader::new(RichText::new("Notable partnerships").size(14.0).strong())
        .default_open(false)
        .show(ui, |ui| {
            if partnerships.is_empty() {
                empty_state(ui, "No partnerships in the selected seasons.");
                return;
            }
            let rows: Vec<Vec<String>> = partnerships
                .iter()
                .map(|p| {
                    vec![
                        format!("{} & {}", p.batters.0, p.batters.1),
                        p.runs.to_string(),
                        p.balls.to_string(),
                        p.batting_team.clone(),
                        p.bowling_team.clone(),
                    ]
                })
                .collect();
            ChartPlotter::draw_result_table(
                ui,
                "partnership_table",
                &["Partners", "Runs", "Balls", "Batting", "Against"],
                &rows,
            );
        });

    ui.add_space(8.0);
    egui::CollapsingHeader::new(RichText::new("Phase specialists").size(14.0).strong())
        .default_open(false)
        .show(ui, |ui| {
            for leaders in specialists {
                ui.add_space(6.0);
                ui.label(RichText::new(leaders.phase.label()).size(13.0).strong());
                ui.add_space(4.0);

                ui.columns(2, |columns| {
                    columns[0].label(RichText::new("Batting (strike rate)").size(12.0));
                    let rows: Vec<Vec<String>> = leaders
                        .batting
                        .iter()
                        .map(|r| {
                            vec![
                                r.name.clone(),
                                fmt_rate(r.rate),
                                r.volume.to_string(),
                                r.matches.to_string(),
                            ]
                        })
                        .collect();
                    ChartPlotter::draw_result_table(
                        &mut columns[0],
                        &format!("specialist_bat_{}", leaders.phase.label()),
                        &["Batter", "SR", "Runs", "Matches"],
                        &rows,
                    );

                    columns[1].label(RichText::new("Bowling (economy)").size(12.0));
                    let rows: Vec<Vec<String>> = leaders
                        .bowling
                        .iter()
                        .map(|r| {
                            vec![
                                r.name.clone(),
                                fmt_rate(r.rate),
                                r.volume.to_string(),
                                r.matches.to_string(),
                            ]
                        })
                        .collect();
                    ChartPlotter::draw_result_table(
                        &mut columns[1],
                        &format!("specialist_bowl_{}", leaders.phase.label()),
                        &["Bowler", "Econ", "Wkts", "Matches"],
                        &rows,
                    );
                });
            }
        });
}
