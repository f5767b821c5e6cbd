use thiserror::Error;

use nmea_ingest::SourceError;
use nmea_model::{PathError, SchemaError, SelectorError};

/// Fatal conditions of a conversion run.
///
/// Alignment misses are not errors; they are counted in the run summary.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("failed to write NMEA output: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
