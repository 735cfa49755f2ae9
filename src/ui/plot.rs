use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Plot};

use crate::color::ColorMap;
use crate::data::aggregate::GroupSummary;
use crate::state::AppState;

const PLOT_HEIGHT: f32 = 260.0;
const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(135, 206, 235);
const SATISFACTION_COLOR: Color32 = Color32::from_rgb(255, 127, 80);

// ---------------------------------------------------------------------------
// Central panel: the four charts in a 2×2 grid
// ---------------------------------------------------------------------------

pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore employee data  (File → Open…)");
        });
        return;
    }

    ui.heading("Visualizations");
    ui.columns(2, |cols| {
        cols[0].strong("Age Distribution");
        age_histogram(&mut cols[0], state);
        cols[1].strong("Monthly Income by Gender");
        income_box_plot(
            &mut cols[1],
            "income_by_gender",
            "Gender",
            &state.summary.income_by_gender,
            &state.gender_colors,
        );
    });
    ui.add_space(8.0);
    ui.columns(2, |cols| {
        cols[0].strong("Environment Satisfaction Levels");
        satisfaction_chart(&mut cols[0], state);
        cols[1].strong("Monthly Income by Marital Status");
        income_box_plot(
            &mut cols[1],
            "income_by_marital_status",
            "Marital Status",
            &state.summary.income_by_marital_status,
            &state.marital_colors,
        );
    });
}

fn age_histogram(ui: &mut Ui, state: &AppState) {
    let bars: Vec<Bar> = state
        .summary
        .age_histogram
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .name(format!("{:.1}–{:.1}", bin.start, bin.end))
                .stroke(Stroke::new(1.0, Color32::BLACK))
        })
        .collect();

    Plot::new("age_histogram")
        .height(PLOT_HEIGHT)
        .x_axis_label("Age")
        .y_axis_label("Frequency")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(HISTOGRAM_COLOR).name("Age"));
        });
}

fn satisfaction_chart(ui: &mut Ui, state: &AppState) {
    let bars: Vec<Bar> = state
        .summary
        .satisfaction_counts
        .iter()
        .map(|(&level, &count)| {
            Bar::new(level as f64, count as f64)
                .width(0.8)
                .name(format!("Level {level}"))
                .stroke(Stroke::new(1.0, Color32::BLACK))
        })
        .collect();

    Plot::new("satisfaction_levels")
        .height(PLOT_HEIGHT)
        .x_axis_label("Satisfaction Level")
        .y_axis_label("Number of Employees")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(SATISFACTION_COLOR).name("Employees"));
        });
}

/// One box per group, placed at x = 0, 1, 2, … and labelled on the axis.
fn income_box_plot(
    ui: &mut Ui,
    id: &str,
    axis_label: &str,
    groups: &[GroupSummary],
    colors: &ColorMap,
) {
    let labels: Vec<String> = groups.iter().map(|g| g.group.clone()).collect();

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(axis_label)
        .y_axis_label("Monthly Income")
        .x_axis_formatter(move |mark: GridMark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, g) in groups.iter().enumerate() {
                let color = colors.color_for(&g.group);
                let s = g.income;
                let elem = BoxElem::new(
                    i as f64,
                    BoxSpread::new(s.min, s.q1, s.median, s.q3, s.max),
                )
                .name(format!("{} (n = {})", g.group, g.count))
                .box_width(0.5)
                .whisker_width(0.3)
                .stroke(Stroke::new(1.5, color))
                .fill(color.linear_multiply(0.3));

                plot_ui.box_plot(BoxPlot::new(vec![elem]).color(color).name(&g.group));
            }
        });
}
