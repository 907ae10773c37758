use thiserror::Error;

/// Failures reaching or using the live-game service.
///
/// Always surfaced as 500 Internal Server Error; recovery is retrying the request or
/// running the repair job.
#[derive(Error, Debug)]
pub enum LiveGameError {
    /// Transport or decoding failure from reqwest.
    #[error("Live game service request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Live game service returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body for diagnostics
        body: String,
    },

    /// No live game document exists for the reference.
    #[error("Live game {0} not found")]
    NotFound(String),

    /// A document with the reference already exists.
    #[error("Live game {0} already exists")]
    AlreadyExists(String),

    /// The store refused the operation (used by the in-memory store's failure injection).
    #[error("Live game store unavailable: {0}")]
    Unavailable(String),
}
