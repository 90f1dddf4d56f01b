use crate::config::ConfigError;
use crate::fetch::error::FetchError;
use crate::series::error::SeriesError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SensorFetchError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine output directory")]
    OutputDirResolution(#[source] std::io::Error),
}
