use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Column names of the source file
// ---------------------------------------------------------------------------

pub const AGE: &str = "Age";
pub const MONTHLY_INCOME: &str = "MonthlyIncome";
pub const GENDER: &str = "Gender";
pub const MARITAL_STATUS: &str = "MaritalStatus";
pub const ENVIRONMENT_SATISFACTION: &str = "EnvironmentSatisfaction";

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    AGE,
    MONTHLY_INCOME,
    GENDER,
    MARITAL_STATUS,
    ENVIRONMENT_SATISFACTION,
];

// ---------------------------------------------------------------------------
// RawEmployee – one row as read from disk
// ---------------------------------------------------------------------------

/// One employee observation before cleaning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawEmployee {
    #[serde(rename = "Age")]
    pub age: i64,
    #[serde(rename = "MonthlyIncome")]
    pub monthly_income: f64,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "MaritalStatus")]
    pub marital_status: String,
    #[serde(rename = "EnvironmentSatisfaction")]
    pub environment_satisfaction: i64,
}

// ---------------------------------------------------------------------------
// AgeGroup – fixed right-open bins over Age
// ---------------------------------------------------------------------------

/// Bin edges for [`AgeGroup`]; bin `i` covers `EDGES[i] <= age < EDGES[i + 1]`.
pub const AGE_BIN_EDGES: [i64; 6] = [20, 30, 40, 50, 60, 70];

/// Derived age bucket. Ages outside `[20, 70)` are [`AgeGroup::Unassigned`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeGroup {
    Twenties,
    Thirties,
    Forties,
    Fifties,
    Sixties,
    Unassigned,
}

impl AgeGroup {
    /// The assigned groups in bin order (excludes `Unassigned`).
    pub const BINNED: [AgeGroup; 5] = [
        AgeGroup::Twenties,
        AgeGroup::Thirties,
        AgeGroup::Forties,
        AgeGroup::Fifties,
        AgeGroup::Sixties,
    ];

    pub fn from_age(age: i64) -> Self {
        // partition_point gives the number of edges <= age.
        let upper = AGE_BIN_EDGES.partition_point(|&edge| edge <= age);
        if upper == 0 || upper == AGE_BIN_EDGES.len() {
            return AgeGroup::Unassigned;
        }
        Self::BINNED[upper - 1]
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Twenties => "20-30",
            AgeGroup::Thirties => "31-40",
            AgeGroup::Forties => "41-50",
            AgeGroup::Fifties => "51-60",
            AgeGroup::Sixties => "61-70",
            AgeGroup::Unassigned => "unassigned",
        }
    }

    /// Half-open `[start, end)` age range, `None` for `Unassigned`.
    pub fn bounds(self) -> Option<(i64, i64)> {
        let idx = Self::BINNED.iter().position(|&g| g == self)?;
        Some((AGE_BIN_EDGES[idx], AGE_BIN_EDGES[idx + 1]))
    }

    pub fn is_assigned(self) -> bool {
        self != AgeGroup::Unassigned
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Employee – one row of the cleaned table
// ---------------------------------------------------------------------------

/// A cleaned employee record: income clipped, age group derived.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub age: i64,
    pub age_group: AgeGroup,
    /// Clipped to the table's [`IncomeBounds`].
    pub monthly_income: f64,
    pub gender: String,
    pub marital_status: String,
    pub environment_satisfaction: i64,
}

/// Tukey fences over `MonthlyIncome`, fixed when the table is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomeBounds {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IncomeBounds {
    /// Multiplier applied to the interquartile range.
    pub const FENCE: f64 = 1.5;

    pub fn from_quartiles(q1: f64, q3: f64) -> Self {
        let iqr = q3 - q1;
        IncomeBounds {
            q1,
            q3,
            lower: q1 - Self::FENCE * iqr,
            upper: q3 + Self::FENCE * iqr,
        }
    }

    /// Clamp `value` into `[lower, upper]`. Values on a bound are unchanged.
    pub fn cap(&self, value: f64) -> f64 {
        if value < self.lower {
            self.lower
        } else if value > self.upper {
            self.upper
        } else {
            value
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

// ---------------------------------------------------------------------------
// CleanedTable – the complete prepared dataset
// ---------------------------------------------------------------------------

/// The prepared dataset with its categorical domains. Immutable once built.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    /// All employees (rows) in source order.
    pub employees: Vec<Employee>,
    pub income_bounds: IncomeBounds,
    /// Observed age groups, including `Unassigned` if any age fell outside the bins.
    pub age_groups: BTreeSet<AgeGroup>,
    pub genders: BTreeSet<String>,
    pub marital_statuses: BTreeSet<String>,
}

impl CleanedTable {
    /// Build the categorical domains from already-cleaned employees.
    pub fn from_employees(employees: Vec<Employee>, income_bounds: IncomeBounds) -> Self {
        let mut age_groups = BTreeSet::new();
        let mut genders = BTreeSet::new();
        let mut marital_statuses = BTreeSet::new();

        for emp in &employees {
            age_groups.insert(emp.age_group);
            genders.insert(emp.gender.clone());
            marital_statuses.insert(emp.marital_status.clone());
        }

        CleanedTable {
            employees,
            income_bounds,
            age_groups,
            genders,
            marital_statuses,
        }
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_groups_follow_right_open_bins() {
        for age in 0..100 {
            let group = AgeGroup::from_age(age);
            match group.bounds() {
                Some((start, end)) => assert!(start <= age && age < end, "age {age} in {group}"),
                None => assert!(!(20..70).contains(&age), "age {age} left unassigned"),
            }
        }
    }

    #[test]
    fn age_group_edges() {
        assert_eq!(AgeGroup::from_age(19), AgeGroup::Unassigned);
        assert_eq!(AgeGroup::from_age(20), AgeGroup::Twenties);
        assert_eq!(AgeGroup::from_age(29), AgeGroup::Twenties);
        assert_eq!(AgeGroup::from_age(30), AgeGroup::Thirties);
        assert_eq!(AgeGroup::from_age(69), AgeGroup::Sixties);
        assert_eq!(AgeGroup::from_age(70), AgeGroup::Unassigned);
        assert_eq!(AgeGroup::from_age(-5), AgeGroup::Unassigned);
    }

    #[test]
    fn labels_match_source_dashboard() {
        let labels: Vec<_> = AgeGroup::BINNED.iter().map(|g| g.label()).collect();
        assert_eq!(labels, ["20-30", "31-40", "41-50", "51-60", "61-70"]);
    }

    #[test]
    fn cap_is_idempotent_and_keeps_bounds() {
        let bounds = IncomeBounds::from_quartiles(1000.0, 3000.0);
        assert_eq!(bounds.lower, -2000.0);
        assert_eq!(bounds.upper, 6000.0);

        for v in [-1e9, -2000.0, 0.0, 2500.0, 6000.0, 6000.5, 1e12] {
            let once = bounds.cap(v);
            assert!(bounds.contains(once));
            assert_eq!(bounds.cap(once), once);
        }
        assert_eq!(bounds.cap(6000.0), 6000.0);
        assert_eq!(bounds.cap(-2000.0), -2000.0);
    }
}
