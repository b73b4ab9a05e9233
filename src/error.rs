use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the service can report.
///
/// Nothing is retried or swallowed: an error ends the current operation and
/// is handed to the caller with its category intact.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed date (or other scalar) input.
    #[error("Invalid input: {0}")]
    Parse(String),

    /// Referenced id or collection does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Well-formed input that violates a rule, e.g. deadline before start.
    #[error("{0}")]
    Validation(String),

    /// The chat API is unreachable, misconfigured or returned a non-2xx status.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The chat API answered, but not with the JSON shape we asked for.
    #[error("Failed to parse AI response: {0}")]
    BadUpstreamResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}
