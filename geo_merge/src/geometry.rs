//! Polygon-collection flattening.
//!
//! Geometry type tags are unreliable in the input corpus, so the shape is
//! decided once at parse time by counting actual nesting depth down to the
//! first scalar leaf, and everything downstream branches on the resulting
//! [`Geometry`] tag instead of re-inspecting the tree.

use serde::Serialize;
use serde_json::Value;

use crate::errors::GeometryError;

/// One boundary loop as parallel, length-matched coordinate sequences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ring {
    /// Longitudes, in input order.
    pub lons: Vec<f64>,
    /// Latitudes, in input order.
    pub lats: Vec<f64>,
}

impl Ring {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.lons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lons.is_empty()
    }

    /// Vertex-average centroid. Good enough as a rotation/scale pivot for
    /// cartogram corrections; this is not the area centroid.
    pub fn centroid(&self) -> (f64, f64) {
        let n = self.lons.len() as f64;
        let cx = self.lons.iter().sum::<f64>() / n;
        let cy = self.lats.iter().sum::<f64>() / n;
        (cx, cy)
    }
}

/// Parsed geometry, tagged once by observed depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single polygon: one or more rings, the first being the outer
    /// boundary.
    Polygon(Vec<Ring>),
    /// Several disjoint polygon parts sharing one entity name.
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// The outer ring of each constituent polygon: exactly one entry for a
    /// polygon, one per part for a multi-polygon.
    pub fn outer_rings(self) -> Vec<Ring> {
        match self {
            Geometry::Polygon(rings) => rings.into_iter().take(1).collect(),
            Geometry::MultiPolygon(polygons) => polygons
                .into_iter()
                .filter_map(|rings| rings.into_iter().next())
                .collect(),
        }
    }
}

/// One flattened output row: an entity name and one of its outer rings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingRow {
    /// Entity name as spelled by the geometry source.
    pub name: String,
    /// The ring's coordinates.
    pub ring: Ring,
}

/// Nesting depth from `value` to the first scalar leaf, following first
/// elements. A polygon's `coordinates` sit at depth 3 (rings, points,
/// scalars), a multi-polygon's at depth 4.
fn nesting_depth(value: &Value) -> usize {
    let mut depth = 0;
    let mut current = value;
    while let Some(array) = current.as_array() {
        depth += 1;
        match array.first() {
            Some(inner) => current = inner,
            None => break,
        }
    }
    depth
}

/// Parses a `coordinates` tree into a tagged [`Geometry`] by depth, never
/// by the feature's `type` tag.
pub fn parse_geometry(name: &str, coordinates: &Value) -> Result<Geometry, GeometryError> {
    match nesting_depth(coordinates) {
        3 => Ok(Geometry::Polygon(parse_rings(name, coordinates)?)),
        4 => {
            let parts = coordinates
                .as_array()
                .ok_or_else(|| GeometryError::Malformed {
                    name: name.to_string(),
                    message: "multi-polygon root is not an array".into(),
                })?;
            let polygons = parts
                .iter()
                .map(|part| parse_rings(name, part))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Geometry::MultiPolygon(polygons))
        }
        depth => Err(GeometryError::UnrecognizedDepth {
            name: name.to_string(),
            depth,
        }),
    }
}

fn parse_rings(name: &str, value: &Value) -> Result<Vec<Ring>, GeometryError> {
    let rings = value.as_array().ok_or_else(|| GeometryError::Malformed {
        name: name.to_string(),
        message: "ring list is not an array".into(),
    })?;
    rings.iter().map(|ring| parse_ring(name, ring)).collect()
}

fn parse_ring(name: &str, value: &Value) -> Result<Ring, GeometryError> {
    let points = value.as_array().ok_or_else(|| GeometryError::Malformed {
        name: name.to_string(),
        message: "ring is not an array of points".into(),
    })?;
    if points.len() < 3 {
        return Err(GeometryError::Malformed {
            name: name.to_string(),
            message: format!("ring has {} points, need at least 3", points.len()),
        });
    }

    let mut lons = Vec::with_capacity(points.len());
    let mut lats = Vec::with_capacity(points.len());
    for point in points {
        let pair = point.as_array().ok_or_else(|| GeometryError::Malformed {
            name: name.to_string(),
            message: "point is not a coordinate pair".into(),
        })?;
        let lon = pair.first().and_then(Value::as_f64);
        let lat = pair.get(1).and_then(Value::as_f64);
        match (lon, lat) {
            (Some(lon), Some(lat)) => {
                lons.push(lon);
                lats.push(lat);
            }
            _ => {
                return Err(GeometryError::Malformed {
                    name: name.to_string(),
                    message: "non-numeric coordinate".into(),
                });
            }
        }
    }
    Ok(Ring { lons, lats })
}

fn feature_ring_rows(index: usize, feature: &Value) -> Result<Vec<RingRow>, GeometryError> {
    let name = feature
        .pointer("/properties/name")
        .and_then(Value::as_str)
        .ok_or(GeometryError::MissingName { index })?;
    let coordinates = feature
        .pointer("/geometry/coordinates")
        .ok_or_else(|| GeometryError::Malformed {
            name: name.to_string(),
            message: "feature has no `geometry.coordinates`".into(),
        })?;
    let geometry = parse_geometry(name, coordinates)?;
    Ok(geometry
        .outer_rings()
        .into_iter()
        .map(|ring| RingRow {
            name: name.to_string(),
            ring,
        })
        .collect())
}

/// Flattens a feature collection into one row per outer ring.
///
/// Per-feature failure isolation: a malformed feature is logged and
/// skipped, the rest of the collection keeps going. Output order follows
/// input feature order. Only a root that is not a feature collection at
/// all is fatal.
pub fn flatten_features(collection: &Value) -> Result<Vec<RingRow>, GeometryError> {
    let features = collection
        .get("features")
        .and_then(Value::as_array)
        .ok_or(GeometryError::NotACollection)?;

    let mut rows = Vec::with_capacity(features.len());
    let mut skipped = 0usize;
    for (index, feature) in features.iter().enumerate() {
        match feature_ring_rows(index, feature) {
            Ok(mut feature_rows) => rows.append(&mut feature_rows),
            Err(err) => {
                skipped += 1;
                tracing::warn!(index, %err, "skipping malformed feature");
            }
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, kept = rows.len(), "feature collection had malformed features");
    }
    Ok(rows)
}
