use thiserror::Error;

/// Errors produced by the lore client and its components.
#[derive(Error, Debug)]
pub enum LoreError {
    /// Low-level HTTP transport failure (connection refused, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON (de)serialization failed at the serde level.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a non-success status.
    ///
    /// Fatal for the current run: remaining sentences are not attempted and
    /// no partial lore is returned.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code (e.g. 404, 500, 503).
        status: u16,
        /// Response body text.
        body: String,
    },

    /// The whole-story variant produced text that is not valid JSON.
    ///
    /// Carries the raw model output so the caller can show it for inspection.
    #[error("model output is not valid JSON")]
    InvalidJson {
        /// The raw response text that failed to parse.
        raw: String,
    },

    /// An assembled scene buffer did not parse even after brace patching.
    #[error("scene buffer did not parse after repair: {0}")]
    Unparseable(String),

    /// Reading input or writing the lore file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for LoreError {
    fn from(err: anyhow::Error) -> Self {
        LoreError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LoreError>;
