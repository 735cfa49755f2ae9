use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::config::Config;
use crate::data::aggregate::DashboardSummary;
use crate::data::clean::prepare;
use crate::data::filter::{filter, FilterDimension, FilteredTable, Selection};
use crate::data::loader::load_file;
use crate::data::model::{AgeGroup, CleanedTable};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Cleaned dataset (None until a file is loaded).
    pub table: Option<CleanedTable>,

    /// File the current table was loaded from.
    pub source: Option<PathBuf>,

    /// Per-dimension filter selections.
    pub selection: Selection,

    /// Indices of employees passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregates over `visible_indices`, rebuilt with them.
    pub summary: DashboardSummary,

    pub gender_colors: ColorMap,
    pub marital_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub histogram_bins: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            table: None,
            source: None,
            selection: Selection::default(),
            visible_indices: Vec::new(),
            summary: DashboardSummary::default(),
            gender_colors: ColorMap::default(),
            marital_colors: ColorMap::default(),
            status_message: None,
            histogram_bins: config.histogram_bins(),
        }
    }

    /// Load and prepare `path`. On failure the previous table stays in place
    /// and the error is kept for display.
    pub fn open(&mut self, path: &Path) {
        match load_table(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} employees from {} (MonthlyIncome fences [{:.2}, {:.2}], \
                     genders {:?}, marital statuses {:?})",
                    table.len(),
                    path.display(),
                    table.income_bounds.lower,
                    table.income_bounds.upper,
                    table.genders,
                    table.marital_statuses
                );
                self.source = Some(path.to_path_buf());
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly prepared table, select everything and recompute.
    pub fn set_table(&mut self, table: CleanedTable) {
        self.selection = Selection::all(&table);
        self.gender_colors = ColorMap::new(&table.genders);
        self.marital_colors = ColorMap::new(&table.marital_statuses);
        self.table = Some(table);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` and `summary` after a selection change.
    pub fn refilter(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        let filtered = filter(table, &self.selection);
        self.summary = DashboardSummary::compute(&filtered, self.histogram_bins);
        self.visible_indices = filtered.into_indices();
        log::debug!(
            "{} of {} employees visible",
            self.visible_indices.len(),
            table.len()
        );
    }

    /// The filtered rows for the table view.
    pub fn filtered(&self) -> Option<FilteredTable<'_>> {
        self.table
            .as_ref()
            .map(|t| FilteredTable::from_indices(t, &self.visible_indices))
    }

    pub fn toggle_age_group(&mut self, group: AgeGroup) {
        self.selection.toggle_age_group(group);
        self.refilter();
    }

    pub fn toggle_category(&mut self, dim: FilterDimension, value: &str) {
        match dim {
            FilterDimension::AgeGroup => {
                if let Some(group) = AgeGroup::BINNED
                    .into_iter()
                    .chain([AgeGroup::Unassigned])
                    .find(|g| g.label() == value)
                {
                    self.selection.toggle_age_group(group);
                }
            }
            FilterDimension::Gender => {
                self.selection.toggle_gender(value);
            }
            FilterDimension::MaritalStatus => {
                self.selection.toggle_marital_status(value);
            }
        }
        self.refilter();
    }

    /// Select all values in a dimension.
    pub fn select_all(&mut self, dim: FilterDimension) {
        if let Some(table) = &self.table {
            self.selection.select_all(table, dim);
            self.refilter();
        }
    }

    /// Deselect all values in a dimension.
    pub fn select_none(&mut self, dim: FilterDimension) {
        self.selection.clear(dim);
        self.refilter();
    }
}

/// File → cleaned table, with the path attached to any error.
pub fn load_table(path: &Path) -> Result<CleanedTable> {
    let raw = load_file(path).with_context(|| format!("loading {}", path.display()))?;
    let table = prepare(raw).with_context(|| format!("preparing {}", path.display()))?;
    Ok(table)
}
