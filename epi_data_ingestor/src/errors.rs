use thiserror::Error;

use crate::flatten::FlattenError;
use crate::providers::ProviderError;

/// The unified error type for the `epi_data_ingestor` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An unexpected record shape encountered while flattening.
    #[error(transparent)]
    Flatten(#[from] FlattenError),

    /// A failure at the statistics-provider boundary. Propagated unchanged;
    /// retry/backoff is the collaborator's responsibility.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A table is missing a column the operation requires.
    #[error("required column `{0}` is missing")]
    MissingColumn(String),

    /// A column holds a value of an unexpected type.
    #[error("column `{column}` holds a non-{expected} value at row {row}")]
    ColumnType {
        /// Column name.
        column: String,
        /// Expected cell kind.
        expected: &'static str,
        /// Offending row index.
        row: usize,
    },
}
