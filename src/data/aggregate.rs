use std::collections::BTreeMap;

use super::filter::FilteredTable;
use super::model::Employee;
use super::stats::FiveNumberSummary;

// ---------------------------------------------------------------------------
// Age histogram
// ---------------------------------------------------------------------------

/// One equal-width histogram bin. `end` is exclusive except for the last bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Split the filtered ages into `bins` equal-width bins spanning their min/max.
///
/// Empty input gives an empty histogram. When every age is equal the range is
/// widened to `[age - 0.5, age + 0.5]`.
pub fn age_histogram(filtered: &FilteredTable<'_>, bins: usize) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let ages: Vec<f64> = filtered.iter().map(|e| e.age as f64).collect();

    let Some((min, max)) = ages.iter().fold(None, |acc: Option<(f64, f64)>, &a| {
        Some(match acc {
            Some((lo, hi)) => (lo.min(a), hi.max(a)),
            None => (a, a),
        })
    }) else {
        return Vec::new();
    };

    let (lo, hi) = if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    };
    let width = (hi - lo) / bins as f64;
    let edge = |i: usize| {
        if i == bins {
            hi
        } else {
            lo + width * i as f64
        }
    };

    let mut counts = vec![0usize; bins];
    for a in ages {
        let mut idx = (((a - lo) * bins as f64 / (hi - lo)) as usize).min(bins - 1);
        // Rounding can land an age that sits on an edge one bin off.
        if idx > 0 && a < edge(idx) {
            idx -= 1;
        } else if idx + 1 < bins && a >= edge(idx + 1) {
            idx += 1;
        }
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: edge(i),
            end: edge(i + 1),
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Income distribution per category
// ---------------------------------------------------------------------------

/// Box-plot statistics of `MonthlyIncome` for one category value.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub group: String,
    pub count: usize,
    pub income: FiveNumberSummary,
}

/// Group by `key`, ordered by group value. Groups without members do not appear.
fn income_summary_by<'a>(
    filtered: &FilteredTable<'a>,
    key: impl Fn(&'a Employee) -> &'a str,
) -> Vec<GroupSummary> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for emp in filtered.iter() {
        groups.entry(key(emp)).or_default().push(emp.monthly_income);
    }

    groups
        .into_iter()
        .filter_map(|(group, incomes)| {
            let count = incomes.len();
            FiveNumberSummary::from_values(incomes).map(|income| GroupSummary {
                group: group.to_string(),
                count,
                income,
            })
        })
        .collect()
}

pub fn income_by_gender(filtered: &FilteredTable<'_>) -> Vec<GroupSummary> {
    income_summary_by(filtered, |e| e.gender.as_str())
}

pub fn income_by_marital_status(filtered: &FilteredTable<'_>) -> Vec<GroupSummary> {
    income_summary_by(filtered, |e| e.marital_status.as_str())
}

// ---------------------------------------------------------------------------
// Environment satisfaction
// ---------------------------------------------------------------------------

/// Number of employees per `EnvironmentSatisfaction` level, ascending by level.
pub fn satisfaction_counts(filtered: &FilteredTable<'_>) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();
    for emp in filtered.iter() {
        *counts.entry(emp.environment_satisfaction).or_insert(0) += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// All four views at once
// ---------------------------------------------------------------------------

/// Everything the dashboard draws for one selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub visible: usize,
    pub age_histogram: Vec<HistogramBin>,
    pub income_by_gender: Vec<GroupSummary>,
    pub satisfaction_counts: BTreeMap<i64, usize>,
    pub income_by_marital_status: Vec<GroupSummary>,
}

impl DashboardSummary {
    pub fn compute(filtered: &FilteredTable<'_>, histogram_bins: usize) -> Self {
        DashboardSummary {
            visible: filtered.len(),
            age_histogram: age_histogram(filtered, histogram_bins),
            income_by_gender: income_by_gender(filtered),
            satisfaction_counts: satisfaction_counts(filtered),
            income_by_marital_status: income_by_marital_status(filtered),
        }
    }
}
