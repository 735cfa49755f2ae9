use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::Employee;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

const HEADERS: [&str; 6] = [
    "Age",
    "AgeGroup",
    "MonthlyIncome",
    "Gender",
    "MaritalStatus",
    "EnvironmentSatisfaction",
];

fn cells(emp: &Employee) -> [String; 6] {
    [
        emp.age.to_string(),
        emp.age_group.label().to_string(),
        format!("{:.2}", emp.monthly_income),
        emp.gender.clone(),
        emp.marital_status.clone(),
        emp.environment_satisfaction.to_string(),
    ]
}

/// "Filtered Employee Data": one row per visible employee, in table order.
pub fn filtered_table(ui: &mut Ui, state: &AppState) {
    let Some(filtered) = state.filtered() else {
        return;
    };
    let rows: Vec<&Employee> = filtered.iter().collect();

    ui.strong(format!("Filtered Employee Data ({} rows)", rows.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(70.0), HEADERS.len())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let emp = rows[row.index()];
                for cell in cells(emp) {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
