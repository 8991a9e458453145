use thiserror::Error;

/// Failure taxonomy for the state-changing actions. Every variant maps
/// to a distinct caller behavior: redirect (`Unauthenticated`,
/// `NotFound`), inline form error (`Validation`, `PreconditionFailed`,
/// `Conflict`), or a generic retryable message (`Persistence`).
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    PreconditionFailed(String),

    #[error("{0}")]
    Conflict(String),

    /// Storage-layer failure. The transaction has been rolled back;
    /// nothing was applied. The detail string is for logs, not users.
    #[error("storage failure: {0}")]
    Persistence(String),
}

impl From<rusqlite::Error> for ActionError {
    fn from(e: rusqlite::Error) -> Self {
        ActionError::Persistence(e.to_string())
    }
}
