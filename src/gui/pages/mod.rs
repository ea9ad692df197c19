//! Dashboard pages. Each module renders one query result.

pub mod head_to_head;
pub mod matchup;
pub mod players;
pub mod records;

use egui::{Color32, RichText};

/// Shared empty state for selections that match nothing.
pub fn empty_state(ui: &mut egui::Ui, message: &str) {
    ui.add_space(30.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(message).size(16.0).color(Color32::GRAY));
    });
}

/// Format a rate for display (two decimals everywhere a rate is shown).
pub fn fmt_rate(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a count (records store every value as f64).
pub fn fmt_count(value: f64) -> String {
    format!("{}", value.round() as i64)
}
