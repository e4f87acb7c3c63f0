//! Per-entity snapshot record.

use serde::Serialize;

use crate::errors::Error;
use crate::flatten::NAME_COLUMN;
use crate::models::table::Table;

/// One named entity's snapshot metrics.
///
/// Counts are `Option` because the flattener fills missing fields with
/// nulls; a null stays a null all the way to the render layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRecord {
    /// Entity name. Canonical once the alias table has been applied.
    pub name: String,
    pub confirmed: Option<u64>,
    pub recovered: Option<u64>,
    pub deaths: Option<u64>,
    /// Base-10 log of `confirmed`; `None` whenever `confirmed` is 0 or
    /// missing. Filled by [`crate::metrics::with_log10`].
    pub confirmed_log10: Option<f64>,
}

/// Extracts typed entity records from a flattened snapshot table.
///
/// The `name` column is required and must hold text; the stat columns are
/// optional (an absent column reads as all-null).
pub fn entity_records(table: &Table) -> Result<Vec<EntityRecord>, Error> {
    let name_idx = table
        .column_index(NAME_COLUMN)
        .ok_or_else(|| Error::MissingColumn(NAME_COLUMN.to_string()))?;

    let mut records = Vec::with_capacity(table.len());
    for (row_idx, row) in table.rows.iter().enumerate() {
        let name = row[name_idx].as_text().ok_or(Error::ColumnType {
            column: NAME_COLUMN.to_string(),
            expected: "text",
            row: row_idx,
        })?;
        records.push(EntityRecord {
            name: name.to_string(),
            confirmed: table.cell(row_idx, "confirmed").and_then(|c| c.as_u64()),
            recovered: table.cell(row_idx, "recovered").and_then(|c| c.as_u64()),
            deaths: table.cell(row_idx, "deaths").and_then(|c| c.as_u64()),
            confirmed_log10: None,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten_snapshot;
    use serde_json::json;

    #[test]
    fn extraction_keeps_nulls_explicit() {
        let tree = json!({
            "A": {"confirmed": 100, "recovered": 10, "deaths": 1},
            "B": {"confirmed": 1000},
        });
        let table = flatten_snapshot(&tree).unwrap();
        let records = entity_records(&table).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].deaths, Some(1));
        assert_eq!(records[1].recovered, None);
        assert_eq!(records[1].deaths, None);
    }

    #[test]
    fn missing_name_column_is_an_error() {
        let table = Table::default();
        assert!(matches!(
            entity_records(&table),
            Err(Error::MissingColumn(_))
        ));
    }
}
