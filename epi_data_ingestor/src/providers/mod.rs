//! Provider abstraction for disease-statistics sources.
//!
//! This module defines the [`StatsProvider`] trait, the unified interface
//! for fetching the global snapshot, the overall summary, and per-entity
//! history from any statistics vendor. Each concrete implementation (such
//! as the JHU-CSSE-style REST provider in [`covid_rest`]) handles its own
//! endpoint layout.
//!
//! The trait is async and supports dynamic dispatch (`dyn StatsProvider`)
//! for runtime selection. Whatever the vendor, the core receives already
//! materialized trees; nothing downstream of this boundary does I/O, and
//! nothing here retries — transient failures propagate unchanged.

pub mod covid_rest;
pub mod errors;

pub use errors::{ProviderError, ProviderInitError};

use async_trait::async_trait;
use serde_json::Value;

use crate::models::summary::Summary;

/// A source of nested epidemiological record trees.
#[async_trait]
pub trait StatsProvider {
    /// The global snapshot: entity name -> flat stats mapping.
    async fn fetch_snapshot(&self) -> Result<Value, ProviderError>;

    /// The overall worldwide summary.
    async fn fetch_summary(&self) -> Result<Summary, ProviderError>;

    /// One entity's history tree: entity name -> `{history: {date: stats}}`.
    async fn fetch_history(&self, entity: &str) -> Result<Value, ProviderError>;
}
