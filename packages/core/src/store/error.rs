use thiserror::Error;

/// Failures reported by a [`DocumentStore`](super::DocumentStore) backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No document with this id exists.
    #[error("document {0} not found")]
    NotFound(i64),

    /// The write violated a uniqueness or integrity rule of the backend.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Any other backend failure (connectivity, malformed data, ...).
    #[error("storage backend error: {0}")]
    Backend(String),
}
