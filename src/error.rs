use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or reshaping input tables.
///
/// There is no local recovery anywhere in the pipeline: any of these aborts
/// the whole run before the output image is written.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input file missing or unreadable.
    #[error("failed to read {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An expected column is absent from a loaded table.
    #[error("{path}: missing expected column {column:?}")]
    Schema { path: PathBuf, column: String },

    /// A year label or date field failed numeric/date coercion.
    #[error("could not parse {field} value {value:?}")]
    DataType { field: &'static str, value: String },

    /// Malformed delimited data, surfaced from the CSV parser.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
