//! Statistics-side normalization core.
//!
//! Flattens nested per-entity record trees from a disease-statistics
//! provider into row/column tables, canonicalizes entity names across
//! sources, derives logarithmic and first-difference metric series, and
//! shapes the results into render-ready chart tables.

pub mod aliases;
pub mod charts;
pub mod errors;
pub mod flatten;
pub mod metrics;
pub mod models;
pub mod providers;
