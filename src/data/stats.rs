// ---------------------------------------------------------------------------
// Quantiles and box-plot summaries
// ---------------------------------------------------------------------------

/// Quantile `q` in `[0, 1]` of an ascending-sorted slice, interpolating
/// linearly between the two nearest order statistics (position `(n - 1) * q`).
///
/// Returns `None` for an empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = last as f64 * q.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Sort a copy of `values` ascending (NaNs last).
pub fn sorted(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.into_iter().collect();
    out.sort_by(f64::total_cmp);
    out
}

/// min, Q1, median, Q3, max of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// `None` when there are no values.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let sorted = sorted(values);
        Some(FiveNumberSummary {
            min: *sorted.first()?,
            q1: quantile_sorted(&sorted, 0.25)?,
            median: quantile_sorted(&sorted, 0.5)?,
            q3: quantile_sorted(&sorted, 0.75)?,
            max: *sorted.last()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates_between_order_statistics() {
        let s = sorted([120000.0, 5000.0, 6000.0]);
        assert_eq!(quantile_sorted(&s, 0.25), Some(5500.0));
        assert_eq!(quantile_sorted(&s, 0.5), Some(6000.0));
        assert_eq!(quantile_sorted(&s, 0.75), Some(63000.0));
        assert_eq!(quantile_sorted(&s, 0.0), Some(5000.0));
        assert_eq!(quantile_sorted(&s, 1.0), Some(120000.0));
    }

    #[test]
    fn quantile_of_even_sample() {
        let s = sorted([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(quantile_sorted(&s, 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&s, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&s, 0.75), Some(3.25));
    }

    #[test]
    fn quantile_of_empty_is_none() {
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert!(FiveNumberSummary::from_values(Vec::new()).is_none());
    }

    #[test]
    fn five_number_summary_of_single_value() {
        let s = FiveNumberSummary::from_values([42.0]).unwrap();
        assert_eq!(
            s,
            FiveNumberSummary {
                min: 42.0,
                q1: 42.0,
                median: 42.0,
                q3: 42.0,
                max: 42.0
            }
        );
    }
}
