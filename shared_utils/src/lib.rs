//! Small helpers shared across the workspace crates.

pub mod dates;
pub mod env;
