//! Render-ready chart tables and entity-selection helpers.
//!
//! These are the crate's output surface: the external chart layer consumes
//! them as-is. The upstream's `deaths` column is renamed `succumbed` here,
//! matching the display vocabulary.

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::Error;
use crate::flatten::NAME_COLUMN;
use crate::models::history::TimeSeriesPoint;
use crate::models::record::EntityRecord;
use crate::models::table::Table;

/// One bar of the top-N bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarRow {
    pub name: String,
    pub succumbed: Option<u64>,
    pub confirmed: Option<u64>,
    pub recovered: Option<u64>,
}

/// One row of the cumulative area chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaRow {
    pub date: NaiveDate,
    pub confirmed: Option<u64>,
    pub recovered: Option<u64>,
    pub succumbed: Option<u64>,
}

/// One row of the first-difference area chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRow {
    pub date: NaiveDate,
    pub change_confirmed: Option<i64>,
    pub change_recovered: Option<i64>,
    pub change_succumbed: Option<i64>,
}

/// Top `n` entities by confirmed cases, descending. Entities with a
/// missing count sort last; ties keep snapshot order.
pub fn top_confirmed(records: &[EntityRecord], n: usize) -> Vec<BarRow> {
    let mut rows: Vec<BarRow> = records
        .iter()
        .map(|r| BarRow {
            name: r.name.clone(),
            succumbed: r.deaths,
            confirmed: r.confirmed,
            recovered: r.recovered,
        })
        .collect();
    rows.sort_by(|a, b| b.confirmed.cmp(&a.confirmed));
    rows.truncate(n);
    rows
}

/// Date-indexed cumulative series for the area chart.
pub fn area_rows(points: &[TimeSeriesPoint]) -> Vec<AreaRow> {
    points
        .iter()
        .map(|p| AreaRow {
            date: p.date,
            confirmed: p.confirmed,
            recovered: p.recovered,
            succumbed: p.deaths,
        })
        .collect()
}

/// Date-indexed first-difference series for the changes chart.
pub fn change_rows(points: &[TimeSeriesPoint]) -> Vec<ChangeRow> {
    points
        .iter()
        .map(|p| ChangeRow {
            date: p.date,
            change_confirmed: p.change_confirmed,
            change_recovered: p.change_recovered,
            change_succumbed: p.change_deaths,
        })
        .collect()
}

/// Entity names of a snapshot table, in table order. Feeds the picker.
pub fn available_entities(table: &Table) -> Result<Vec<String>, Error> {
    let name_idx = table
        .column_index(NAME_COLUMN)
        .ok_or_else(|| Error::MissingColumn(NAME_COLUMN.to_string()))?;
    Ok(table
        .rows
        .iter()
        .filter_map(|row| row.get(name_idx).and_then(|c| c.as_text()))
        .map(str::to_string)
        .collect())
}

/// Case-insensitive entity selection, by contract of the picker (the alias
/// table itself stays case-sensitive).
pub fn pick_entity<'a>(names: &'a [String], query: &str) -> Option<&'a str> {
    let wanted = query.to_lowercase();
    names
        .iter()
        .find(|name| name.to_lowercase() == wanted)
        .map(String::as_str)
}
