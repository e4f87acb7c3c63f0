//! Derived metric series over flattened records.
//!
//! Convention for undefined values, applied consistently: the derived cell
//! is `None`. `confirmed_log10` is null whenever the count is 0 or missing
//! (never coerced to 0 or negative infinity), and the first observation of
//! every difference series is null (the series-start sentinel).

use crate::models::history::TimeSeriesPoint;
use crate::models::record::EntityRecord;

/// Fills `confirmed_log10 = log10(confirmed)` on every record.
///
/// Undefined (`confirmed` is 0 or missing) stays an explicit `None`.
pub fn with_log10(records: &mut [EntityRecord]) {
    for record in records.iter_mut() {
        record.confirmed_log10 = match record.confirmed {
            Some(c) if c > 0 => Some((c as f64).log10()),
            _ => None,
        };
    }
}

/// Fills the first-difference columns (`change_X = X[t] - X[t-1]`),
/// ordering the points by date first.
///
/// Index 0 gets `None` in every difference column. A null cumulative value
/// nulls the differences on both sides of it.
pub fn first_differences(points: &mut [TimeSeriesPoint]) {
    points.sort_by_key(|p| p.date);

    for i in (1..points.len()).rev() {
        let (confirmed_prev, recovered_prev, deaths_prev) = {
            let prev = &points[i - 1];
            (prev.confirmed, prev.recovered, prev.deaths)
        };
        let current = &mut points[i];
        current.change_confirmed = diff(current.confirmed, confirmed_prev);
        current.change_recovered = diff(current.recovered, recovered_prev);
        current.change_deaths = diff(current.deaths, deaths_prev);
    }
    if let Some(first) = points.first_mut() {
        first.change_confirmed = None;
        first.change_recovered = None;
        first.change_deaths = None;
    }
}

fn diff(current: Option<u64>, previous: Option<u64>) -> Option<i64> {
    match (current, previous) {
        (Some(c), Some(p)) => Some(c as i64 - p as i64),
        _ => None,
    }
}
