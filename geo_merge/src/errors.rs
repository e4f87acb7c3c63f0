use thiserror::Error;

/// Errors from parsing and flattening polygon collections.
///
/// Feature-level variants are skip-and-report: one bad feature never
/// aborts the rest of the collection.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Coordinate nesting depth matches neither a polygon (3) nor a
    /// multi-polygon (4).
    #[error("feature `{name}`: coordinate depth {depth} is neither polygon (3) nor multi-polygon (4)")]
    UnrecognizedDepth {
        /// Entity name of the offending feature.
        name: String,
        /// Observed nesting depth.
        depth: usize,
    },

    /// Structurally broken coordinates (short ring, non-numeric point, ...).
    #[error("feature `{name}`: {message}")]
    Malformed {
        /// Entity name of the offending feature.
        name: String,
        /// What was wrong.
        message: String,
    },

    /// The document root is not a feature collection.
    #[error("document root is not a feature collection with a `features` array")]
    NotACollection,

    /// A feature with no usable `properties.name`.
    #[error("feature at index {index} has no `properties.name`")]
    MissingName {
        /// Position in the `features` array.
        index: usize,
    },
}

/// Errors from the geometry-metrics left join.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The metric table holds two rows with the same canonical name.
    #[error("duplicate metric row for canonical name `{0}`")]
    DuplicateKey(String),
}
