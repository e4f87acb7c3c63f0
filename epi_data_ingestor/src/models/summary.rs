//! Overall worldwide summary supplied by the statistics provider.

use serde::{Deserialize, Serialize};

/// The headline totals, taken verbatim from the provider.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Summary {
    /// Provider's own freshness stamp, passed through untouched.
    pub last_updated: String,
    pub confirmed: u64,
    pub recovered: u64,
    pub deaths: u64,
}
