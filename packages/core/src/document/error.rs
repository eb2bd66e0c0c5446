use thiserror::Error;

use crate::store::StoreError;

/// Errors visible to callers of [`DocumentService`](super::DocumentService).
///
/// `NotFound` and `Duplicate` are expected outcomes that the transport layer
/// renders for the client. `Storage` wraps every other backend failure
/// unchanged and should be treated as an internal error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Document {0} does not exist")]
    NotFound(i64),

    #[error("Duplicate document: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Storage(StoreError),
}

pub type DocumentResult<T> = Result<T, DocumentError>;
