use thiserror::Error;

/// Library error type for backdrop operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The upstream request was rejected, timed out, or answered with a
    /// non-success status.
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// The search endpoint returned JSON that could not be interpreted as a
    /// list of photo records.
    #[error("malformed search response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),

    /// Underlying IO error while reading configuration.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
