//! Control Panel Widget
//! Left side panel with page navigation, the season filter and the
//! per-page selectors.

use egui::{Color32, ComboBox, RichText, ScrollArea};

use crate::data::Dataset;
use crate::stats::records::RecordCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    HeadToHead,
    Players,
    Matchup,
    Records,
}

impl PageKind {
    pub const ALL: [PageKind; 4] = [
        PageKind::HeadToHead,
        PageKind::Players,
        PageKind::Matchup,
        PageKind::Records,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PageKind::HeadToHead => "Head to Head",
            PageKind::Players => "Player Profiles",
            PageKind::Matchup => "Matchup Analysis",
            PageKind::Records => "Records & Statistics",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerRole {
    Batsman,
    Bowler,
}

/// Everything a query needs, snapshotted per recompute.
#[derive(Debug, Clone)]
pub struct Selections {
    pub page: PageKind,
    /// Selected seasons; empty means all seasons.
    pub seasons: Vec<String>,
    pub team_a: String,
    pub team_b: String,
    pub role: PlayerRole,
    pub batter: String,
    pub bowler: String,
    pub matchup_batter: String,
    pub matchup_bowler: String,
    pub category: RecordCategory,
}

/// Actions triggered by the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
}

/// Left side control panel.
pub struct ControlPanel {
    pub selections: Selections,
    teams: Vec<String>,
    batters: Vec<String>,
    bowlers: Vec<String>,
    seasons: Vec<String>,
    season_selected: Vec<bool>,
    pub status: String,
    pub busy: bool,
}

impl ControlPanel {
    pub fn new(dataset: &Dataset) -> Self {
        let teams = dataset.teams();
        let batters = dataset.batters();
        let bowlers = dataset.bowlers();
        let seasons = dataset.seasons();

        let selections = Selections {
            page: PageKind::HeadToHead,
            seasons: Vec::new(),
            team_a: teams.first().cloned().unwrap_or_default(),
            team_b: teams.get(1).or(teams.first()).cloned().unwrap_or_default(),
            role: PlayerRole::Batsman,
            batter: batters.first().cloned().unwrap_or_default(),
            bowler: bowlers.first().cloned().unwrap_or_default(),
            matchup_batter: batters.first().cloned().unwrap_or_default(),
            matchup_bowler: bowlers.first().cloned().unwrap_or_default(),
            category: RecordCategory::MostWickets,
        };

        Self {
            selections,
            season_selected: vec![false; seasons.len()],
            teams,
            batters,
            bowlers,
            seasons,
            status: "Ready".to_string(),
            busy: false,
        }
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the panel; reports whether any selection changed.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut changed = false;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("CrickView")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("IPL delivery analytics 2008-2024")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Navigation =====
        ui.label(RichText::new("Navigation").size(14.0).strong());
        ui.add_space(5.0);
        for page in PageKind::ALL {
            if ui
                .radio_value(&mut self.selections.page, page, page.label())
                .changed()
            {
                changed = true;
            }
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Season filter =====
        if !self.seasons.is_empty() {
            ui.label(RichText::new("Seasons").size(14.0).strong());
            ui.add_space(5.0);

            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(5.0)
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_salt("season_filter")
                        .max_height(120.0)
                        .show(ui, |ui| {
                            for (i, season) in self.seasons.iter().enumerate() {
                                if ui.checkbox(&mut self.season_selected[i], season).changed() {
                                    changed = true;
                                }
                            }
                        });
                });

            ui.horizontal(|ui| {
                if ui.small_button("All").clicked() {
                    self.season_selected.iter_mut().for_each(|v| *v = false);
                    changed = true;
                }
                ui.label(
                    RichText::new("nothing ticked = every season")
                        .size(10.0)
                        .color(Color32::GRAY),
                );
            });

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(5.0);
        }

        // ===== Page selectors =====
        match self.selections.page {
            PageKind::HeadToHead => {
                ui.label(RichText::new("Teams").size(14.0).strong());
                ui.add_space(5.0);
                changed |= combo(ui, "team_a", "Team A:", &mut self.selections.team_a, &self.teams);
                ui.add_space(5.0);
                changed |= combo(ui, "team_b", "Team B:", &mut self.selections.team_b, &self.teams);
            }
            PageKind::Players => {
                ui.label(RichText::new("Player").size(14.0).strong());
                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    if ui
                        .radio_value(&mut self.selections.role, PlayerRole::Batsman, "Batsman")
                        .changed()
                    {
                        changed = true;
                    }
                    if ui
                        .radio_value(&mut self.selections.role, PlayerRole::Bowler, "Bowler")
                        .changed()
                    {
                        changed = true;
                    }
                });
                ui.add_space(5.0);
                match self.selections.role {
                    PlayerRole::Batsman => {
                        changed |= combo(
                            ui,
                            "profile_batter",
                            "Batsman:",
                            &mut self.selections.batter,
                            &self.batters,
                        );
                    }
                    PlayerRole::Bowler => {
                        changed |= combo(
                            ui,
                            "profile_bowler",
                            "Bowler:",
                            &mut self.selections.bowler,
                            &self.bowlers,
                        );
                    }
                }
            }
            PageKind::Matchup => {
                ui.label(RichText::new("Matchup").size(14.0).strong());
                ui.add_space(5.0);
                changed |= combo(
                    ui,
                    "matchup_batter",
                    "Batsman:",
                    &mut self.selections.matchup_batter,
                    &self.batters,
                );
                ui.add_space(5.0);
                changed |= combo(
                    ui,
                    "matchup_bowler",
                    "Bowler:",
                    &mut self.selections.matchup_bowler,
                    &self.bowlers,
                );
            }
            PageKind::Records => {
                ui.label(RichText::new("Category").size(14.0).strong());
                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    ui.add_sized([70.0, 20.0], egui::Label::new("Record:"));
                    ComboBox::from_id_salt("record_category")
                        .width(190.0)
                        .selected_text(self.selections.category.label())
                        .show_ui(ui, |ui| {
                            for category in RecordCategory::ALL {
                                if ui
                                    .selectable_label(
                                        self.selections.category == category,
                                        category.label(),
                                    )
                                    .clicked()
                                {
                                    self.selections.category = category;
                                    changed = true;
                                }
                            }
                        });
                });
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Status =====
        if self.busy {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));
            });
        } else {
            let status_color = if self.status.contains("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        }

        if changed {
            self.selections.seasons = self
                .seasons
                .iter()
                .zip(self.season_selected.iter())
                .filter(|(_, &selected)| selected)
                .map(|(season, _)| season.clone())
                .collect();
            ControlPanelAction::SelectionChanged
        } else {
            ControlPanelAction::None
        }
    }
}

fn combo(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    current: &mut String,
    options: &[String],
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.add_sized([70.0, 20.0], egui::Label::new(label));
        ComboBox::from_id_salt(id.to_string())
            .width(190.0)
            .selected_text(current.clone())
            .show_ui(ui, |ui| {
                for option in options {
                    if ui.selectable_label(*current == *option, option).clicked() {
                        *current = option.clone();
                        changed = true;
                    }
                }
            });
    });
    changed
}
