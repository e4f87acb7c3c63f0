//! Geometry-side normalization core.
//!
//! Flattens polygon collections of unknown nesting depth into parallel
//! coordinate sequences, applies cartogram corrections for display
//! compactness, and left-joins ring coordinates with entity metrics into
//! the table the choropleth renderer consumes.

pub mod errors;
pub mod geometry;
pub mod merge;
pub mod palette;
pub mod transform;
