//! Conversion of nested per-entity record trees into row-oriented tables.
//!
//! The statistics provider hands back trees whose first level maps an
//! entity name to a sub-record. A sub-record is either a flat mapping of
//! scalar stats (snapshot shape) or a mapping carrying a `history` field
//! whose value maps date strings to flat stats (history shape). Anything
//! else is a schema violation and is reported, not silently dropped.

use chrono::NaiveDate;
use indexmap::IndexSet;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::table::{Cell, Table};
use shared_utils::dates::parse_flexible_date;

/// Name of the entity-key column in snapshot tables.
pub const NAME_COLUMN: &str = "name";
/// Name of the date column in history tables.
pub const DATE_COLUMN: &str = "date";

const HISTORY_FIELD: &str = "history";

/// An unexpected record shape. Fatal for the record it names.
#[derive(Debug, Error)]
pub enum FlattenError {
    /// A sub-record was neither a flat stats mapping nor `history`-bearing.
    #[error("schema violation for `{entity}`: {message}")]
    Schema {
        /// The entity whose sub-record violated the expected shape.
        entity: String,
        /// What was wrong with it.
        message: String,
    },

    /// The tree root (or a history map) was not a mapping at all.
    #[error("expected a mapping at the {context}")]
    NotAMap {
        /// Which position in the tree was malformed.
        context: &'static str,
    },

    /// A history date key that parses under none of the accepted formats.
    #[error("unparseable history date key: {0}")]
    BadDateKey(String),
}

/// Flattens a snapshot tree (entity name -> flat stats mapping) into a
/// table with one row per entity.
///
/// Columns are the union of scalar fields across all entities, in
/// first-seen order, with the entity key as the leading `name` column.
/// Fields absent from a given entity become [`Cell::Null`]. The original
/// first-level key order is preserved.
pub fn flatten_snapshot(tree: &Value) -> Result<Table, FlattenError> {
    let entities = tree.as_object().ok_or(FlattenError::NotAMap {
        context: "snapshot root",
    })?;

    let mut columns: IndexSet<String> = IndexSet::new();
    columns.insert(NAME_COLUMN.to_string());

    let mut flat: Vec<(&String, &Map<String, Value>)> = Vec::with_capacity(entities.len());
    for (name, sub_record) in entities {
        let fields = sub_record.as_object().ok_or_else(|| FlattenError::Schema {
            entity: name.clone(),
            message: "sub-record is not a mapping".into(),
        })?;
        for (field, value) in fields {
            // A history-bearing sub-record is still well-formed; the nested
            // history map is the concern of `flatten_history`.
            if field == HISTORY_FIELD {
                continue;
            }
            if Cell::from_scalar(value).is_none() {
                return Err(FlattenError::Schema {
                    entity: name.clone(),
                    message: format!("field `{field}` is neither a scalar nor `history`"),
                });
            }
            columns.insert(field.clone());
        }
        flat.push((name, fields));
    }

    let columns: Vec<String> = columns.into_iter().collect();
    let mut rows = Vec::with_capacity(flat.len());
    for (name, fields) in flat {
        let mut row = vec![Cell::Null; columns.len()];
        row[0] = Cell::Text(name.clone());
        for (idx, column) in columns.iter().enumerate().skip(1) {
            if let Some(value) = fields.get(column) {
                if let Some(cell) = Cell::from_scalar(value) {
                    row[idx] = cell;
                }
            }
        }
        rows.push(row);
    }

    Ok(Table { columns, rows })
}

/// Flattens one entity's history out of a provider history tree
/// (entity name -> `{history: {date string -> flat stats}}`).
///
/// Produces one row per date key with a leading `date` column of parsed
/// [`NaiveDate`]s, sorted ascending by the parsed date. Lexical order is
/// not good enough here: the upstream writes `m/d/yy` keys without leading
/// zeros, so string order and temporal order diverge at month and year
/// rollovers.
pub fn flatten_history(tree: &Value, entity: &str) -> Result<Table, FlattenError> {
    let root = tree.as_object().ok_or(FlattenError::NotAMap {
        context: "history root",
    })?;
    let sub_record = root
        .get(entity)
        .and_then(Value::as_object)
        .ok_or_else(|| FlattenError::Schema {
            entity: entity.to_string(),
            message: "no sub-record for entity in history tree".into(),
        })?;
    let history = sub_record
        .get(HISTORY_FIELD)
        .ok_or_else(|| FlattenError::Schema {
            entity: entity.to_string(),
            message: "sub-record carries no `history` field".into(),
        })?
        .as_object()
        .ok_or(FlattenError::NotAMap {
            context: "history field",
        })?;

    let mut columns: IndexSet<String> = IndexSet::new();
    columns.insert(DATE_COLUMN.to_string());

    let mut dated: Vec<(NaiveDate, &Map<String, Value>)> = Vec::with_capacity(history.len());
    for (date_key, stats) in history {
        let date = parse_flexible_date(date_key)
            .map_err(|_| FlattenError::BadDateKey(date_key.clone()))?;
        let fields = stats.as_object().ok_or_else(|| FlattenError::Schema {
            entity: entity.to_string(),
            message: format!("history entry `{date_key}` is not a mapping"),
        })?;
        for (field, value) in fields {
            if Cell::from_scalar(value).is_none() {
                return Err(FlattenError::Schema {
                    entity: entity.to_string(),
                    message: format!("history field `{field}` at `{date_key}` is not a scalar"),
                });
            }
            columns.insert(field.clone());
        }
        dated.push((date, fields));
    }

    dated.sort_by_key(|(date, _)| *date);

    let columns: Vec<String> = columns.into_iter().collect();
    let mut rows = Vec::with_capacity(dated.len());
    for (date, fields) in dated {
        let mut row = vec![Cell::Null; columns.len()];
        row[0] = Cell::Date(date);
        for (idx, column) in columns.iter().enumerate().skip(1) {
            if let Some(value) = fields.get(column) {
                if let Some(cell) = Cell::from_scalar(value) {
                    row[idx] = cell;
                }
            }
        }
        rows.push(row);
    }

    Ok(Table { columns, rows })
}
