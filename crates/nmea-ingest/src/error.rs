use std::path::PathBuf;

use thiserror::Error;

/// A table could not be loaded.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read table {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("table {path} has no header row")]
    Empty { path: PathBuf },
}
