use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::FilterDimension;
use crate::data::model::AgeGroup;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// One checkbox row: label, current state, and what to toggle.
enum FilterValue {
    AgeGroup(AgeGroup),
    Category(String),
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No dataset loaded.");
        return;
    };

    // Snapshot the domains so we can mutate state inside the loop.
    let domains: Vec<(FilterDimension, Vec<FilterValue>)> = FilterDimension::ALL
        .into_iter()
        .map(|dim| {
            let values = match dim {
                FilterDimension::AgeGroup => table
                    .age_groups
                    .iter()
                    .map(|&g| FilterValue::AgeGroup(g))
                    .collect(),
                FilterDimension::Gender => table
                    .genders
                    .iter()
                    .cloned()
                    .map(FilterValue::Category)
                    .collect(),
                FilterDimension::MaritalStatus => table
                    .marital_statuses
                    .iter()
                    .cloned()
                    .map(FilterValue::Category)
                    .collect(),
            };
            (dim, values)
        })
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (dim, values) in &domains {
                let (n_selected, n_total) = match &state.table {
                    Some(t) => state.selection.counts(t, *dim),
                    None => (0, 0),
                };
                let header_text = format!("Select {dim}  ({n_selected}/{n_total})");

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.title())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(*dim);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(*dim);
                            }
                        });

                        for value in values {
                            filter_checkbox(ui, state, *dim, value);
                        }
                    });
            }
        });
}

fn filter_checkbox(ui: &mut Ui, state: &mut AppState, dim: FilterDimension, value: &FilterValue) {
    let (mut checked, text) = match value {
        FilterValue::AgeGroup(g) => (
            state.selection.age_groups.contains(g),
            RichText::new(g.label()),
        ),
        FilterValue::Category(v) => {
            let (selected, colors) = match dim {
                FilterDimension::MaritalStatus => {
                    (&state.selection.marital_statuses, &state.marital_colors)
                }
                _ => (&state.selection.genders, &state.gender_colors),
            };
            (
                selected.contains(v),
                RichText::new(v.as_str()).color(colors.color_for(v)),
            )
        }
    };

    let mut response = ui.checkbox(&mut checked, text);
    if let FilterValue::AgeGroup(g) = value {
        response = match g.bounds() {
            Some((start, end)) => response.on_hover_text(format!("ages {start} to {}", end - 1)),
            None => response.on_hover_text("ages outside 20 to 69"),
        };
    }
    if response.changed() {
        match value {
            FilterValue::AgeGroup(g) => state.toggle_age_group(*g),
            FilterValue::Category(v) => state.toggle_category(dim, v),
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} employees loaded, {} visible",
                table.len(),
                state.visible_indices.len()
            ));
            ui.separator();
            let b = table.income_bounds;
            ui.label(format!(
                "MonthlyIncome capped to [{:.0}, {:.0}]",
                b.lower, b.upper
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open employee data")
        .add_filter("Supported files", &["csv", "tsv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
