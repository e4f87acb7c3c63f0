//! Flat region-level case table (one row per region per date).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One region's case counts on one date.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RegionCaseRow {
    pub region: String,
    pub date: NaiveDate,
    pub cases: u64,
    pub deaths: u64,
}

/// Selects the most recent date's rows, preserving input order.
///
/// The regional choropleth only wants the latest picture; older rows are
/// left behind before the merge.
pub fn latest_snapshot(rows: &[RegionCaseRow]) -> Vec<RegionCaseRow> {
    let Some(latest) = rows.iter().map(|r| r.date).max() else {
        return Vec::new();
    };
    rows.iter().filter(|r| r.date == latest).cloned().collect()
}
