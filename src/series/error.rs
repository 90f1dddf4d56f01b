use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("Failed to read artifact '{0}'")]
    CsvRead(PathBuf, #[source] csv::Error),

    #[error("Artifact '{path}' has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Unparseable timestamp '{value}' in '{path}'")]
    Timestamp {
        path: PathBuf,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Non-numeric value '{value}' for column '{column}' in '{path}'")]
    Value {
        path: PathBuf,
        column: String,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("No fetched artifacts for category '{category}', nothing to graph")]
    NoArtifacts { category: String },
}
