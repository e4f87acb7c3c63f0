//! Left join of geometry rings against entity metrics.
//!
//! Geometry is the driving side: every ring appears in the output exactly
//! once, matched or not. Multi-part entities duplicate their entity's
//! metrics across every ring. The metric side must be name-unique after
//! canonicalization; a duplicate there is a hard error rather than a
//! silent fan-out.

use std::collections::HashMap;

use serde::Serialize;

use epi_data_ingestor::aliases::{AliasTable, Source};
use epi_data_ingestor::models::record::EntityRecord;

use crate::errors::MergeError;
use crate::geometry::RingRow;

/// One geometry ring joined with its entity's metrics. Unmatched rings
/// keep explicit nulls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedGeoRecord {
    /// Canonical entity name.
    pub name: String,
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    pub confirmed: Option<u64>,
    pub recovered: Option<u64>,
    pub deaths: Option<u64>,
    pub confirmed_log10: Option<f64>,
}

/// Left-joins geometry rows against the metric table on canonical name.
///
/// Both sides are canonicalized through the alias table (each under its
/// own source). Errors with [`MergeError::DuplicateKey`] if two metric
/// rows collapse to the same canonical name.
pub fn merge(
    geo_rows: &[RingRow],
    records: &[EntityRecord],
    aliases: &AliasTable,
) -> Result<Vec<MergedGeoRecord>, MergeError> {
    let mut by_name: HashMap<&str, &EntityRecord> = HashMap::with_capacity(records.len());
    for record in records {
        let canonical = aliases.normalize(&record.name, Source::Stats);
        if by_name.insert(canonical, record).is_some() {
            return Err(MergeError::DuplicateKey(canonical.to_string()));
        }
    }

    let mut merged = Vec::with_capacity(geo_rows.len());
    for row in geo_rows {
        let canonical = aliases.normalize(&row.name, Source::Geometry);
        let matched = by_name.get(canonical).copied();
        if matched.is_none() {
            tracing::debug!(name = canonical, "geometry row has no metrics");
        }
        merged.push(MergedGeoRecord {
            name: canonical.to_string(),
            lons: row.ring.lons.clone(),
            lats: row.ring.lats.clone(),
            confirmed: matched.and_then(|r| r.confirmed),
            recovered: matched.and_then(|r| r.recovered),
            deaths: matched.and_then(|r| r.deaths),
            confirmed_log10: matched.and_then(|r| r.confirmed_log10),
        });
    }
    Ok(merged)
}
