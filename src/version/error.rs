use thiserror::Error;

/// Per-source lookup failure. Always recovered at the fan-out boundary as
/// "zero versions from this source"; never propagated to the caller.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
