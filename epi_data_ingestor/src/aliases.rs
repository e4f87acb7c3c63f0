//! Name alias table: parsing, validation, and canonical-name lookup.
//!
//! The three upstream sources (statistics provider, geometry source,
//! regional case table) each spell entity names their own way. This module
//! defines a TOML-backed alias table mapping a source's verbatim spelling
//! to the canonical one used as the join key everywhere else.
//!
//! Key behaviors:
//! - Lookups are case-sensitive on the verbatim source spelling. Callers
//!   that want case-insensitive selection (the region picker) lower-case
//!   on their side; see [`crate::charts::pick_entity`].
//! - Unknown names pass through unchanged. Partial coverage is expected
//!   and non-fatal; passthroughs are logged for audit because upstream
//!   naming drifts over time.
//! - Validation rejects empty or duplicate raw spellings per source and
//!   requires every canonical name to be a fixed point of the table, which
//!   makes `normalize` idempotent.
//! - The table is loaded once per process and never mutated.
//!
//! Entrypoints:
//! - Parse + validate from a TOML string: [`load_aliases_str`]
//! - Parse + validate from a file path: [`load_aliases_path`]
//! - The built-in default table: [`default_aliases`]

use std::collections::HashMap;

use anyhow::{Context, bail};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use toml::from_str;

/// Which upstream source a raw spelling came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// The disease-statistics provider.
    Stats,
    /// The polygon-collection geometry source.
    Geometry,
    /// The flat regional case table (and the lower-cased picker path).
    Regions,
}

impl Source {
    /// The source code used as a TOML key and in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Stats => "stats",
            Source::Geometry => "geometry",
            Source::Regions => "regions",
        }
    }

    fn from_code(code: &str) -> Option<Source> {
        match code {
            "stats" => Some(Source::Stats),
            "geometry" => Some(Source::Geometry),
            "regions" => Some(Source::Regions),
            _ => None,
        }
    }
}

/// One raw-to-canonical alias entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AliasCfg {
    /// The source's verbatim spelling.
    pub raw: String,
    /// The canonical spelling used as the join key.
    pub canonical: String,
}

/// Top-level TOML shape: source code -> alias entries.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AliasTableCfg {
    /// Map of source code ("stats", "geometry", "regions") to entries.
    pub sources: IndexMap<String, Vec<AliasCfg>>,
}

/// Compiled, read-only alias table.
#[derive(Debug)]
pub struct AliasTable {
    map: HashMap<Source, HashMap<String, String>>,
}

impl AliasTable {
    /// Canonicalizes `raw` as spelled by `source`.
    ///
    /// Deterministic pure lookup; unknown names pass through unchanged.
    pub fn normalize<'a>(&'a self, raw: &'a str, source: Source) -> &'a str {
        match self.map.get(&source).and_then(|m| m.get(raw)) {
            Some(canonical) => canonical.as_str(),
            None => {
                tracing::debug!(raw, source = source.as_str(), "no alias, passing through");
                raw
            }
        }
    }

    /// Rewrites record names in place to their canonical spelling.
    pub fn canonicalize(&self, records: &mut [crate::models::record::EntityRecord], source: Source) {
        for record in records.iter_mut() {
            let canonical = self.normalize(&record.name, source);
            if canonical != record.name {
                let owned = canonical.to_string();
                record.name = owned;
            }
        }
    }
}

/// Validates a parsed config and compiles it into a lookup table.
///
/// Errors:
/// - Unknown source code
/// - Empty raw or canonical spelling after trimming
/// - Duplicate raw spelling within one source
/// - A canonical spelling that is itself re-aliased within the same source
///   (that would break `normalize(normalize(x)) == normalize(x)`)
pub fn compile_aliases(cfg: AliasTableCfg) -> anyhow::Result<AliasTable> {
    let mut map: HashMap<Source, HashMap<String, String>> = HashMap::new();

    for (code, entries) in cfg.sources {
        let Some(source) = Source::from_code(code.trim()) else {
            bail!("unknown alias source `{code}` (expected stats, geometry, or regions)");
        };
        let per_source = map.entry(source).or_default();
        for entry in entries {
            let raw = entry.raw.trim().to_string();
            let canonical = entry.canonical.trim().to_string();
            if raw.is_empty() || canonical.is_empty() {
                bail!("alias for source `{code}` has an empty spelling after trimming");
            }
            if per_source.insert(raw.clone(), canonical).is_some() {
                bail!("duplicate raw spelling `{raw}` for source `{code}`");
            }
        }
    }

    for (source, per_source) in &map {
        for canonical in per_source.values() {
            if let Some(elsewhere) = per_source.get(canonical) {
                if elsewhere != canonical {
                    bail!(
                        "canonical `{canonical}` is re-aliased to `{elsewhere}` for source `{}`",
                        source.as_str()
                    );
                }
            }
        }
    }

    Ok(AliasTable { map })
}

/// Parses and validates an alias table from a TOML string.
pub fn load_aliases_str(toml_str: &str) -> anyhow::Result<AliasTable> {
    let cfg: AliasTableCfg = from_str(toml_str).context("failed to parse alias TOML")?;
    compile_aliases(cfg)
}

/// Reads an alias TOML file from disk, parses, and validates it.
pub fn load_aliases_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<AliasTable> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read alias file {}", path.as_ref().display()))?;
    load_aliases_str(&text)
}

const DEFAULT_ALIASES_TOML: &str = r#"
[[sources.stats]]
raw = "US"
canonical = "United States of America"

[[sources.stats]]
raw = "Taiwan*"
canonical = "Taiwan"

[[sources.regions]]
raw = "taiwan*"
canonical = "taiwan"
"#;

/// The built-in default table covering the known upstream spellings.
pub fn default_aliases() -> &'static AliasTable {
    static DEFAULT: Lazy<AliasTable> = Lazy::new(|| {
        load_aliases_str(DEFAULT_ALIASES_TOML).expect("built-in alias table must be valid")
    });
    &DEFAULT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_spellings_are_rewritten() {
        let aliases = default_aliases();
        assert_eq!(
            aliases.normalize("US", Source::Stats),
            "United States of America"
        );
        assert_eq!(aliases.normalize("Taiwan*", Source::Stats), "Taiwan");
        assert_eq!(aliases.normalize("taiwan*", Source::Regions), "taiwan");
    }

    #[test]
    fn unknown_names_pass_through() {
        let aliases = default_aliases();
        assert_eq!(aliases.normalize("Atlantis", Source::Stats), "Atlantis");
    }

    #[test]
    fn lookups_are_case_sensitive() {
        let aliases = default_aliases();
        // "us" is not the stats provider's spelling; it must not match.
        assert_eq!(aliases.normalize("us", Source::Stats), "us");
    }

    #[test]
    fn lookups_are_source_scoped() {
        let aliases = default_aliases();
        assert_eq!(aliases.normalize("US", Source::Geometry), "US");
    }

    #[test]
    fn duplicate_raw_spelling_is_rejected() {
        let toml_str = r#"
            [[sources.stats]]
            raw = "US"
            canonical = "United States of America"
            [[sources.stats]]
            raw = "US"
            canonical = "United States"
        "#;
        let err = load_aliases_str(toml_str).unwrap_err();
        assert!(err.to_string().contains("duplicate raw spelling"));
    }

    #[test]
    fn re_aliased_canonical_is_rejected() {
        let toml_str = r#"
            [[sources.stats]]
            raw = "US"
            canonical = "USA"
            [[sources.stats]]
            raw = "USA"
            canonical = "United States of America"
        "#;
        let err = load_aliases_str(toml_str).unwrap_err();
        assert!(err.to_string().contains("re-aliased"));
    }

    #[test]
    fn unknown_source_code_is_rejected() {
        let toml_str = r#"
            [[sources.satellites]]
            raw = "X"
            canonical = "Y"
        "#;
        let err = load_aliases_str(toml_str).unwrap_err();
        assert!(err.to_string().contains("unknown alias source"));
    }

    use proptest::prelude::*;

    proptest! {
        // Idempotence holds for arbitrary inputs: either the name passes
        // through (identity) or it maps to a canonical that validation
        // guarantees is a fixed point.
        #[test]
        fn normalize_is_idempotent(raw in ".{0,24}") {
            let aliases = default_aliases();
            let once = aliases.normalize(&raw, Source::Stats).to_string();
            let twice = aliases.normalize(&once, Source::Stats).to_string();
            prop_assert_eq!(once, twice);
        }
    }
}
