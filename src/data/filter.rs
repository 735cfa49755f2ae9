use std::collections::BTreeSet;
use std::fmt;

use super::model::{AgeGroup, CleanedTable, Employee};

// ---------------------------------------------------------------------------
// Selection: which categorical values are allowed per dimension
// ---------------------------------------------------------------------------

/// The three categorical dimensions a user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    AgeGroup,
    Gender,
    MaritalStatus,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 3] = [
        FilterDimension::AgeGroup,
        FilterDimension::Gender,
        FilterDimension::MaritalStatus,
    ];

    pub fn title(self) -> &'static str {
        match self {
            FilterDimension::AgeGroup => "Age Group",
            FilterDimension::Gender => "Gender",
            FilterDimension::MaritalStatus => "Marital Status",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Allowed values per dimension. A record passes when its value is in all
/// three sets; an empty set therefore excludes every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub age_groups: BTreeSet<AgeGroup>,
    pub genders: BTreeSet<String>,
    pub marital_statuses: BTreeSet<String>,
}

impl Selection {
    /// Every observed value selected (i.e., show everything).
    pub fn all(table: &CleanedTable) -> Self {
        Selection {
            age_groups: table.age_groups.clone(),
            genders: table.genders.clone(),
            marital_statuses: table.marital_statuses.clone(),
        }
    }

    pub fn matches(&self, emp: &Employee) -> bool {
        self.age_groups.contains(&emp.age_group)
            && self.genders.contains(&emp.gender)
            && self.marital_statuses.contains(&emp.marital_status)
    }

    /// `(selected, total)` for the given dimension.
    pub fn counts(&self, table: &CleanedTable, dim: FilterDimension) -> (usize, usize) {
        match dim {
            FilterDimension::AgeGroup => (self.age_groups.len(), table.age_groups.len()),
            FilterDimension::Gender => (self.genders.len(), table.genders.len()),
            FilterDimension::MaritalStatus => {
                (self.marital_statuses.len(), table.marital_statuses.len())
            }
        }
    }

    /// Re-select every observed value of one dimension.
    pub fn select_all(&mut self, table: &CleanedTable, dim: FilterDimension) {
        match dim {
            FilterDimension::AgeGroup => self.age_groups = table.age_groups.clone(),
            FilterDimension::Gender => self.genders = table.genders.clone(),
            FilterDimension::MaritalStatus => {
                self.marital_statuses = table.marital_statuses.clone()
            }
        }
    }

    pub fn clear(&mut self, dim: FilterDimension) {
        match dim {
            FilterDimension::AgeGroup => self.age_groups.clear(),
            FilterDimension::Gender => self.genders.clear(),
            FilterDimension::MaritalStatus => self.marital_statuses.clear(),
        }
    }

    /// Flip one age group; returns whether it is now selected.
    pub fn toggle_age_group(&mut self, group: AgeGroup) -> bool {
        toggle(&mut self.age_groups, group)
    }

    pub fn toggle_gender(&mut self, gender: &str) -> bool {
        toggle(&mut self.genders, gender.to_string())
    }

    pub fn toggle_marital_status(&mut self, status: &str) -> bool {
        toggle(&mut self.marital_statuses, status.to_string())
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

// ---------------------------------------------------------------------------
// FilteredTable: a view over the rows that pass a selection
// ---------------------------------------------------------------------------

/// Rows of a [`CleanedTable`] that passed a [`Selection`], in table order.
/// Borrows the table and never modifies it.
#[derive(Debug, Clone)]
pub struct FilteredTable<'a> {
    table: &'a CleanedTable,
    indices: Vec<usize>,
}

impl<'a> FilteredTable<'a> {
    /// Rebuild a view from indices previously returned by [`FilteredTable::indices`].
    /// Out-of-range indices are dropped.
    pub fn from_indices(table: &'a CleanedTable, indices: &[usize]) -> Self {
        FilteredTable {
            table,
            indices: indices
                .iter()
                .copied()
                .filter(|&i| i < table.len())
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Employee> + '_ {
        let table = self.table;
        self.indices.iter().map(move |&i| &table.employees[i])
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the employees satisfying all three membership tests, order preserved.
pub fn filter<'a>(table: &'a CleanedTable, selection: &Selection) -> FilteredTable<'a> {
    let indices = table
        .employees
        .iter()
        .enumerate()
        .filter(|(_, emp)| selection.matches(emp))
        .map(|(i, _)| i)
        .collect();
    FilteredTable { table, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clean::prepare;
    use crate::data::clean::tests::{raw, scenario};

    #[test]
    fn all_observed_values_is_identity() {
        let table = prepare(vec![
            raw(18, 900.0, "F", "Single", 1),
            raw(25, 5000.0, "M", "Single", 3),
            raw(45, 120000.0, "F", "Married", 2),
            raw(72, 3000.0, "M", "Divorced", 4),
        ])
        .unwrap();
        let selection = Selection::all(&table);
        let filtered = filter(&table, &selection);

        assert_eq!(filtered.indices(), &[0, 1, 2, 3]);
        let rows: Vec<&Employee> = filtered.iter().collect();
        let expected: Vec<&Employee> = table.employees.iter().collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn empty_dimension_excludes_everything() {
        let table = prepare(scenario()).unwrap();
        for dim in FilterDimension::ALL {
            let mut selection = Selection::all(&table);
            selection.clear(dim);
            assert!(filter(&table, &selection).is_empty(), "{dim}");
        }
        assert!(filter(&table, &Selection::default()).is_empty());
    }

    #[test]
    fn gender_filter_keeps_original_order() {
        let table = prepare(scenario()).unwrap();
        let mut selection = Selection::all(&table);
        selection.genders = BTreeSet::from(["M".to_string()]);

        let filtered = filter(&table, &selection);
        assert_eq!(filtered.indices(), &[0, 2]);
        let ages: Vec<i64> = filtered.iter().map(|e| e.age).collect();
        assert_eq!(ages, [25, 65]);
    }

    #[test]
    fn dimensions_are_intersected() {
        let table = prepare(scenario()).unwrap();
        let mut selection = Selection::all(&table);
        selection.genders = BTreeSet::from(["M".to_string()]);
        selection.age_groups = BTreeSet::from([AgeGroup::Sixties, AgeGroup::Forties]);

        assert_eq!(filter(&table, &selection).indices(), &[2]);
    }

    #[test]
    fn toggle_and_select_all_round_trip() {
        let table = prepare(scenario()).unwrap();
        let mut selection = Selection::all(&table);

        assert!(!selection.toggle_marital_status("Single"));
        assert_eq!(
            selection.counts(&table, FilterDimension::MaritalStatus),
            (1, 2)
        );
        assert_eq!(filter(&table, &selection).indices(), &[1]);

        assert!(selection.toggle_marital_status("Single"));
        assert!(!selection.toggle_age_group(AgeGroup::Twenties));
        selection.select_all(&table, FilterDimension::AgeGroup);
        assert_eq!(selection, Selection::all(&table));
    }

    #[test]
    fn filtering_does_not_touch_the_table() {
        let table = prepare(scenario()).unwrap();
        let before = table.employees.clone();
        let mut selection = Selection::all(&table);
        selection.clear(FilterDimension::Gender);
        let _ = filter(&table, &selection);
        assert_eq!(table.employees, before);
    }

    #[test]
    fn from_indices_drops_stale_rows() {
        let table = prepare(scenario()).unwrap();
        let view = FilteredTable::from_indices(&table, &[2, 7, 0]);
        assert_eq!(view.indices(), &[2, 0]);
        assert_eq!(view.len(), 2);
    }
}
