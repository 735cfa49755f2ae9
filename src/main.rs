mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::EmployeeDashboardApp;
use clap::Parser;
use config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let config = Config::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Employee Data Analysis Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(EmployeeDashboardApp::new(&config)))),
    )
}
