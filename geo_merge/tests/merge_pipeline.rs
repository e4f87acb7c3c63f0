//! End-to-end geometry path: feature collection -> ring rows -> cartogram
//! corrections -> left join with metrics.

use serde_json::{Value, json};

use epi_data_ingestor::aliases::{Source, default_aliases};
use epi_data_ingestor::flatten::flatten_snapshot;
use epi_data_ingestor::metrics::with_log10;
use epi_data_ingestor::models::record::entity_records;

use geo_merge::geometry::flatten_features;
use geo_merge::merge::merge;
use geo_merge::transform;

fn polygon_feature(name: &str, coordinates: Value) -> Value {
    json!({
        "type": "Feature",
        "properties": {"name": name},
        "geometry": {"type": "Polygon", "coordinates": coordinates}
    })
}

fn collection() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            polygon_feature(
                "United States of America",
                json!([[[-100.0, 40.0], [-90.0, 40.0], [-90.0, 45.0], [-100.0, 45.0]]]),
            ),
            // Two-part multi-polygon, 4 points per part.
            polygon_feature(
                "Taiwan",
                json!([
                    [[[121.0, 25.0], [122.0, 25.0], [122.0, 24.0], [121.0, 24.0]]],
                    [[[119.0, 23.5], [119.5, 23.5], [119.5, 23.0], [119.0, 23.0]]],
                ]),
            ),
            polygon_feature(
                "Atlantis",
                json!([[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]]),
            ),
        ]
    })
}

#[test]
fn geometry_and_metrics_meet_in_the_merged_table() {
    let geo_rows = flatten_features(&collection()).unwrap();
    // 1 ring for the polygon, 2 for the multi-polygon, 1 for Atlantis.
    assert_eq!(geo_rows.len(), 4);

    let snapshot = json!({
        "US": {"confirmed": 1000, "recovered": 200, "deaths": 20},
        "Taiwan*": {"confirmed": 100, "recovered": 10, "deaths": 1},
    });
    let table = flatten_snapshot(&snapshot).unwrap();
    let mut records = entity_records(&table).unwrap();
    with_log10(&mut records);

    let merged = merge(&geo_rows, &records, default_aliases()).unwrap();

    // Left join: every ring survives, in input order.
    assert_eq!(merged.len(), geo_rows.len());
    assert_eq!(merged[0].name, "United States of America");
    assert_eq!(merged[0].confirmed, Some(1000));
    assert!((merged[0].confirmed_log10.unwrap() - 3.0).abs() < 1e-12);

    // Both Taiwan rings carry the same (duplicated, not divided) metrics.
    assert_eq!(merged[1].name, "Taiwan");
    assert_eq!(merged[2].name, "Taiwan");
    assert_eq!(merged[1].confirmed, Some(100));
    assert_eq!(merged[2].confirmed, Some(100));
    assert_eq!(merged[1].lons.len(), 4);
    assert_eq!(merged[2].lons.len(), 4);

    // Unmatched geometry keeps explicit nulls.
    assert_eq!(merged[3].name, "Atlantis");
    assert_eq!(merged[3].confirmed, None);
    assert_eq!(merged[3].confirmed_log10, None);
}

#[test]
fn corrections_slot_between_flatten_and_merge() {
    let collection = json!({
        "type": "FeatureCollection",
        "features": [
            polygon_feature(
                "Alaska",
                json!([[[-160.0, 60.0], [-150.0, 60.0], [-150.0, 70.0], [-160.0, 70.0]]]),
            ),
            polygon_feature(
                "Kansas",
                json!([[[-100.0, 37.0], [-95.0, 37.0], [-95.0, 40.0], [-100.0, 40.0]]]),
            ),
        ]
    });

    let geo_rows = flatten_features(&collection).unwrap();
    let corrected: Vec<_> = geo_rows
        .iter()
        .map(|row| (row.name.clone(), transform::apply(&row.ring, &row.name)))
        .collect();

    // Alaska moved, Kansas untouched.
    assert_ne!(corrected[0].1, geo_rows[0].ring);
    assert_eq!(corrected[1].1, geo_rows[1].ring);
    // Ring arity is preserved by the affine ops.
    assert_eq!(corrected[0].1.len(), geo_rows[0].ring.len());
}

#[test]
fn canonical_name_collisions_in_metrics_abort_the_merge() {
    let geo_rows = flatten_features(&collection()).unwrap();
    let snapshot = json!({
        "Taiwan*": {"confirmed": 1},
        "Taiwan": {"confirmed": 2},
    });
    let table = flatten_snapshot(&snapshot).unwrap();
    let records = entity_records(&table).unwrap();
    assert!(merge(&geo_rows, &records, default_aliases()).is_err());
}

// Region-side path: the latest regional rows feed the same merge shape.
#[test]
fn regional_rows_can_back_the_metric_side() {
    use chrono::NaiveDate;
    use epi_data_ingestor::models::record::EntityRecord;
    use epi_data_ingestor::models::region::{RegionCaseRow, latest_snapshot};

    let rows = vec![
        RegionCaseRow {
            region: "Taiwan".into(),
            date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            cases: 50,
            deaths: 1,
        },
        RegionCaseRow {
            region: "Taiwan".into(),
            date: NaiveDate::from_ymd_opt(2020, 3, 2).unwrap(),
            cases: 60,
            deaths: 1,
        },
    ];
    let latest = latest_snapshot(&rows);
    let records: Vec<EntityRecord> = latest
        .iter()
        .map(|r| EntityRecord {
            name: default_aliases().normalize(&r.region, Source::Regions).to_string(),
            confirmed: Some(r.cases),
            recovered: None,
            deaths: Some(r.deaths),
            confirmed_log10: None,
        })
        .collect();

    let geo_rows = flatten_features(&collection()).unwrap();
    let merged = merge(&geo_rows, &records, default_aliases()).unwrap();
    assert_eq!(merged.len(), geo_rows.len());
    let taiwan: Vec<_> = merged.iter().filter(|m| m.name == "Taiwan").collect();
    assert_eq!(taiwan.len(), 2);
    assert!(taiwan.iter().all(|m| m.confirmed == Some(60)));
}
