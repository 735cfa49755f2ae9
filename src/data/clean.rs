use super::error::DataError;
use super::model::{AgeGroup, CleanedTable, Employee, IncomeBounds, RawEmployee};
use super::stats::{quantile_sorted, sorted};

/// Quartiles are undefined below this many records.
pub const MIN_RECORDS: usize = 2;

/// Compute the IQR fences over the un-capped `MonthlyIncome` values.
pub fn income_bounds(raw: &[RawEmployee]) -> Result<IncomeBounds, DataError> {
    if raw.len() < MIN_RECORDS {
        return Err(DataError::InsufficientData {
            required: MIN_RECORDS,
            found: raw.len(),
        });
    }
    let incomes = sorted(raw.iter().map(|r| r.monthly_income));
    let quartiles = quantile_sorted(&incomes, 0.25).zip(quantile_sorted(&incomes, 0.75));
    let (q1, q3) = quartiles.ok_or(DataError::InsufficientData {
        required: MIN_RECORDS,
        found: raw.len(),
    })?;
    Ok(IncomeBounds::from_quartiles(q1, q3))
}

/// Turn loaded rows into the immutable [`CleanedTable`]:
/// clip `MonthlyIncome` to the IQR fences, derive `AgeGroup`, and record the
/// observed categorical domains.
pub fn prepare(raw: Vec<RawEmployee>) -> Result<CleanedTable, DataError> {
    let bounds = income_bounds(&raw)?;

    let mut capped = 0usize;
    let mut unassigned = 0usize;

    let employees: Vec<Employee> = raw
        .into_iter()
        .map(|r| {
            if !bounds.contains(r.monthly_income) {
                capped += 1;
            }
            let age_group = AgeGroup::from_age(r.age);
            if !age_group.is_assigned() {
                unassigned += 1;
            }
            Employee {
                age: r.age,
                age_group,
                monthly_income: bounds.cap(r.monthly_income),
                gender: r.gender,
                marital_status: r.marital_status,
                environment_satisfaction: r.environment_satisfaction,
            }
        })
        .collect();

    log::debug!(
        "MonthlyIncome fences [{:.2}, {:.2}] (Q1 {:.2}, Q3 {:.2}); capped {capped} values",
        bounds.lower,
        bounds.upper,
        bounds.q1,
        bounds.q3
    );
    if unassigned > 0 {
        log::warn!("{unassigned} employees have an age outside every age group");
    }

    Ok(CleanedTable::from_employees(employees, bounds))
}
