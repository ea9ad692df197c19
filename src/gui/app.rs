//! Main application window: control panel on the left, the active page on
//! the right, and a worker thread recomputing the page's query whenever a
//! selection changes.

use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error};

use crate::config::Config;
use crate::data::Dataset;
use crate::gui::control_panel::{ControlPanel, ControlPanelAction, PageKind, PlayerRole, Selections};
use crate::gui::pages;
use crate::stats::head_to_head::{head_to_head, HeadToHead};
use crate::stats::matchup::{matchup, Matchup};
use crate::stats::partnership::{top_partnerships, Partnership};
use crate::stats::phase::{phase_specialists, PhaseLeaders};
use crate::stats::player::{batting_profile, bowling_profile, BattingProfile, BowlingProfile};
use crate::stats::records::{record_table, RecordParams, RecordTable};
use crate::stats::QueryError;

/// How many rows each phase-specialist leaderboard shows.
const SPECIALIST_LIMIT: usize = 5;

/// Result of one page query.
pub enum PageResult {
    HeadToHead(HeadToHead),
    Batting(BattingProfile),
    Bowling(BowlingProfile),
    Matchup(Matchup),
    Records {
        table: RecordTable,
        partnerships: Vec<Partnership>,
        specialists: Vec<PhaseLeaders>,
    },
}

/// Message from the worker thread.
enum CalcResult {
    Complete(Box<PageResult>),
    Error(String),
}

/// Main application window.
pub struct CrickViewApp {
    dataset: Arc<Dataset>,
    config: Config,
    control_panel: ControlPanel,
    result: Option<PageResult>,

    calc_rx: Option<Receiver<CalcResult>>,
    is_calculating: bool,
    /// A selection changed while a query was in flight.
    rerun_needed: bool,
}

impl CrickViewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dataset: Arc<Dataset>, config: Config) -> Self {
        let control_panel = ControlPanel::new(&dataset);
        let mut app = Self {
            dataset,
            config,
            control_panel,
            result: None,
            calc_rx: None,
            is_calculating: false,
            rerun_needed: false,
        };
        app.start_query();
        app
    }

    /// Snapshot the selections and recompute on a worker thread so the UI
    /// keeps painting while polars scans the table.
    fn start_query(&mut self) {
        if self.is_calculating {
            self.rerun_needed = true;
            return;
        }

        let selections = self.control_panel.selections.clone();
        let dataset = Arc::clone(&self.dataset);
        let config = self.config.clone();

        let (tx, rx) = channel();
        self.calc_rx = Some(rx);
        self.is_calculating = true;
        self.control_panel.busy = true;
        self.control_panel.set_status("Computing...");

        thread::spawn(move || {
            debug!(page = ?selections.page, "running page query");
            let result = run_query(&dataset, &config, &selections);
            let _ = match result {
                Ok(result) => tx.send(CalcResult::Complete(Box::new(result))),
                Err(e) => tx.send(CalcResult::Error(e.to_string())),
            };
        });
    }

    /// Poll the worker channel.
    fn check_calculation_results(&mut self) {
        let rx = self.calc_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    CalcResult::Complete(result) => {
                        self.result = Some(*result);
                        self.is_calculating = false;
                        self.control_panel.busy = false;
                        self.control_panel.set_status("Ready");
                        should_keep_receiver = false;
                    }
                    CalcResult::Error(message) => {
                        error!(error = %message, "page query failed");
                        self.is_calculating = false;
                        self.control_panel.busy = false;
                        self.control_panel
                            .set_status(&format!("Error: {message}"));
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.calc_rx = Some(rx);
            }
        }

        if !self.is_calculating && self.rerun_needed {
            self.rerun_needed = false;
            self.start_query();
        }
    }
}

impl eframe::App for CrickViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_calculation_results();

        if self.is_calculating {
            ctx.request_repaint();
        }

        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.control_panel.show(ui) == ControlPanelAction::SelectionChanged {
                        self.start_query();
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match &self.result {
                    Some(PageResult::HeadToHead(data)) => pages::head_to_head::show(ui, data),
                    Some(PageResult::Batting(profile)) => pages::players::show_batting(ui, profile),
                    Some(PageResult::Bowling(profile)) => pages::players::show_bowling(ui, profile),
                    Some(PageResult::Matchup(data)) => pages::matchup::show(ui, data),
                    Some(PageResult::Records {
                        table,
                        partnerships,
                        specialists,
                    }) => pages::records::show(ui, table, partnerships, specialists),
                    None => pages::empty_state(ui, "Computing..."),
                });
        });
    }
}

/// Run the query for the snapshotted selections. Stateless: the dataset is
/// read-only and every call recomputes from it.
fn run_query(
    dataset: &Dataset,
    config: &Config,
    selections: &Selections,
) -> Result<PageResult, QueryError> {
    let deliveries = dataset.deliveries_filtered(&selections.seasons)?;
    let matches = dataset.matches_filtered(&selections.seasons)?;

    match selections.page {
        PageKind::HeadToHead => Ok(PageResult::HeadToHead(head_to_head(
            &deliveries,
            &matches,
            &selections.team_a,
            &selections.team_b,
        )?)),
        PageKind::Players => match selections.role {
            PlayerRole::Batsman => Ok(PageResult::Batting(batting_profile(
                &deliveries,
                &selections.batter,
                config.rolling_window,
            )?)),
            PlayerRole::Bowler => Ok(PageResult::Bowling(bowling_profile(
                &deliveries,
                &selections.bowler,
                config.rolling_window,
            )?)),
        },
        PageKind::Matchup => Ok(PageResult::Matchup(matchup(
            &deliveries,
            &selections.matchup_batter,
            &selections.matchup_bowler,
        )?)),
        PageKind::Records => {
            let params = RecordParams {
                limit: config.record_limit,
                min_qualifying_matches: config.min_qualifying_matches,
            };
            let table = record_table(&deliveries, &matches, selections.category, &params)?;
            let partnerships = top_partnerships(&deliveries, params.limit)?;
            let specialists = phase_specialists(
                &deliveries,
                params.min_qualifying_matches,
                SPECIALIST_LIMIT,
            )?;
            Ok(PageResult::Records {
                table,
                partnerships,
                specialists,
            })
        }
    }
}
