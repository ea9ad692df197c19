//! Chart helpers built on egui_plot.
//!
//! Bar charts for comparisons and rankings, line charts for form trends, and
//! striped grids for metric and result tables.

use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::stats::player::FormPoint;

/// Color palette for chart series.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(255, 87, 34),   // Deep Orange
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

/// Creates the dashboard's charts and tables.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Grouped bar chart: one group of bars per label, one bar per series.
    pub fn draw_grouped_bars(
        ui: &mut egui::Ui,
        id: &str,
        labels: &[String],
        series: &[(String, Vec<f64>)],
        y_label: &str,
        height: f32,
    ) {
        let x_labels: Vec<String> = labels.to_vec();
        let group_width = 0.8;
        let bar_width = group_width / series.len().max(1) as f64;

        Plot::new(id.to_string())
            .height(height)
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .y_axis_label(y_label.to_string())
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 0.25 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (si, (name, values)) in series.iter().enumerate() {
                    let color = Self::series_color(si);
                    let offset = (si as f64 + 0.5) * bar_width - group_width / 2.0;
                    let bars: Vec<Bar> = values
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| Bar::new(i as f64 + offset, v).width(bar_width * 0.9))
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).color(color).name(name));
                }
            });
    }

    /// Single-series ranking bars (one bar per name, best first).
    pub fn draw_ranking_bars(
        ui: &mut egui::Ui,
        id: &str,
        rows: &[(String, f64)],
        y_label: &str,
        height: f32,
    ) {
        let labels: Vec<String> = rows.iter().map(|(name, _)| name.clone()).collect();
        let values: Vec<f64> = rows.iter().map(|(_, v)| *v).collect();
        Self::draw_grouped_bars(
            ui,
            id,
            &labels,
            &[(y_label.to_string(), values)],
            y_label,
            height,
        );
    }

    /// Form trend: per-match values as points plus a rolling-mean line.
    pub fn draw_form_chart(
        ui: &mut egui::Ui,
        id: &str,
        form: &[FormPoint],
        value_name: &str,
        rolling_name: &str,
        y_label: &str,
        height: f32,
    ) {
        let values: Vec<[f64; 2]> = form
            .iter()
            .map(|p| [p.match_index as f64, p.value])
            .collect();
        let rolling: Vec<[f64; 2]> = form
            .iter()
            .map(|p| [p.match_index as f64, p.rolling])
            .collect();

        Plot::new(id.to_string())
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Match")
            .y_axis_label(y_label.to_string())
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(values.iter().copied()))
                        .radius(3.0)
                        .color(Self::series_color(0).gamma_multiply(0.7))
                        .name(value_name),
                );
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(rolling.iter().copied()))
                        .color(Self::series_color(1))
                        .width(2.0)
                        .name(rolling_name),
                );
            });
    }

    /// Two-column label/value grid.
    pub fn draw_metric_grid(ui: &mut egui::Ui, id: &str, metrics: &[(&str, String)]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(id))
                    .striped(true)
                    .min_col_width(110.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for (label, value) in metrics {
                            ui.label(RichText::new(*label).size(12.0));
                            ui.label(RichText::new(value).size(12.0).strong());
                            ui.end_row();
                        }
                    });
            });
    }

    /// Striped table with a bold header row.
    pub fn draw_result_table(
        ui: &mut egui::Ui,
        id: &str,
        headers: &[&str],
        rows: &[Vec<String>],
    ) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(id))
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        for header in headers {
                            ui.label(RichText::new(*header).strong().size(11.0));
                        }
                        ui.end_row();

                        for row in rows {
                            for cell in row {
                                ui.label(RichText::new(cell).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
