//! End-to-end snapshot path: nested tree -> table -> canonical records ->
//! derived metrics -> bar-chart table.

use std::collections::BTreeSet;

use serde_json::json;

use epi_data_ingestor::aliases::{Source, default_aliases};
use epi_data_ingestor::charts::top_confirmed;
use epi_data_ingestor::flatten::flatten_snapshot;
use epi_data_ingestor::metrics::with_log10;
use epi_data_ingestor::models::record::entity_records;

#[test]
fn snapshot_flows_from_tree_to_bar_table() {
    let tree = json!({
        "US": {"confirmed": 1000, "recovered": 200, "deaths": 20},
        "Taiwan*": {"confirmed": 100, "recovered": 10, "deaths": 1},
        "Andorra": {"confirmed": 0, "recovered": 0, "deaths": 0},
    });

    let table = flatten_snapshot(&tree).unwrap();
    let mut records = entity_records(&table).unwrap();
    default_aliases().canonicalize(&mut records, Source::Stats);
    with_log10(&mut records);

    let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["United States of America", "Taiwan", "Andorra"]);

    // log10 defined only where confirmed > 0
    assert!((records[0].confirmed_log10.unwrap() - 3.0).abs() < 1e-12);
    assert_eq!(records[2].confirmed_log10, None);

    let bars = top_confirmed(&records, 2);
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].name, "United States of America");
    assert_eq!(bars[0].succumbed, Some(20));
    assert_eq!(bars[1].name, "Taiwan");
}

#[test]
fn flatten_round_trip_loses_no_fields_and_duplicates_no_rows() {
    let tree = json!({
        "A": {"confirmed": 100, "recovered": 10, "deaths": 1},
        "B": {"confirmed": 1000, "extra_stat": 4},
        "C": {"deaths": 9},
    });
    let entities = tree.as_object().unwrap();

    let table = flatten_snapshot(&tree).unwrap();
    assert_eq!(table.len(), entities.len());

    // Re-group by entity name: each row's non-null field set must equal
    // the original sub-record's field set.
    for (row_idx, (name, sub)) in entities.iter().enumerate() {
        assert_eq!(
            table.cell(row_idx, "name").unwrap().as_text().unwrap(),
            name
        );
        let recovered: BTreeSet<&str> = table
            .columns
            .iter()
            .skip(1)
            .enumerate()
            .filter(|(col_off, _)| !table.rows[row_idx][col_off + 1].is_null())
            .map(|(_, col)| col.as_str())
            .collect();
        let original: BTreeSet<&str> = sub.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(recovered, original, "field set mismatch for {name}");
    }
}
