use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {0}")]
    Network(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response for {0} carried no body")]
    EmptyBody(String),

    #[error("Failed to write artifact '{0}'")]
    ArtifactWrite(PathBuf, #[source] std::io::Error),

    #[error("Fetch task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
