//! Per-(entity, date) time-series point.

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::Error;
use crate::flatten::DATE_COLUMN;
use crate::models::table::Table;

/// One observation of an entity's cumulative counts on a calendar date.
///
/// `change_*` are first differences filled by
/// [`crate::metrics::first_differences`]; the upstream sometimes ships its
/// own `change_*` fields, which the extractor picks up when present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub confirmed: Option<u64>,
    pub recovered: Option<u64>,
    pub deaths: Option<u64>,
    pub change_confirmed: Option<i64>,
    pub change_recovered: Option<i64>,
    pub change_deaths: Option<i64>,
}

/// Extracts typed time-series points from a flattened history table.
///
/// The `date` column is required and must hold parsed dates; every other
/// column is optional.
pub fn time_series(table: &Table) -> Result<Vec<TimeSeriesPoint>, Error> {
    let date_idx = table
        .column_index(DATE_COLUMN)
        .ok_or_else(|| Error::MissingColumn(DATE_COLUMN.to_string()))?;

    let mut points = Vec::with_capacity(table.len());
    for (row_idx, row) in table.rows.iter().enumerate() {
        let date = row[date_idx].as_date().ok_or(Error::ColumnType {
            column: DATE_COLUMN.to_string(),
            expected: "date",
            row: row_idx,
        })?;
        points.push(TimeSeriesPoint {
            date,
            confirmed: table.cell(row_idx, "confirmed").and_then(|c| c.as_u64()),
            recovered: table.cell(row_idx, "recovered").and_then(|c| c.as_u64()),
            deaths: table.cell(row_idx, "deaths").and_then(|c| c.as_u64()),
            change_confirmed: table
                .cell(row_idx, "change_confirmed")
                .and_then(|c| c.as_i64()),
            change_recovered: table
                .cell(row_idx, "change_recovered")
                .and_then(|c| c.as_i64()),
            change_deaths: table
                .cell(row_idx, "change_deaths")
                .and_then(|c| c.as_i64()),
        });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten_history;
    use serde_json::json;

    #[test]
    fn extraction_reads_upstream_change_fields_when_present() {
        let tree = json!({
            "x": {"history": {
                "1/22/20": {"confirmed": 5, "change_confirmed": 0},
                "1/23/20": {"confirmed": 8, "change_confirmed": 3},
            }}
        });
        let table = flatten_history(&tree, "x").unwrap();
        let points = time_series(&table).unwrap();
        assert_eq!(points[0].change_confirmed, Some(0));
        assert_eq!(points[1].change_confirmed, Some(3));
        assert_eq!(points[1].recovered, None);
    }
}
