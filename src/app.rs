use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EmployeeDashboardApp {
    pub state: AppState,
}

impl EmployeeDashboardApp {
    pub fn new(config: &Config) -> Self {
        let mut state = AppState::new(config);
        if let Some(path) = config.startup_file() {
            state.open(&path);
        }
        Self { state }
    }
}

impl eframe::App for EmployeeDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: filtered rows ----
        if self.state.table.is_some() {
            egui::TopBottomPanel::bottom("data_table")
                .resizable(true)
                .default_height(220.0)
                .show(ctx, |ui| {
                    table::filtered_table(ui, &self.state);
                });
        }

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::dashboard(ui, &self.state);
        });
    }
}
