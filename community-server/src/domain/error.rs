use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("posting limit reached, next post allowed at {next_allowed_at}")]
    PostingLimitReached { next_allowed_at: DateTime<Utc> },
}
