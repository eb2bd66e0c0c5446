use async_trait::async_trait;

use super::error::StoreError;
use super::page::PageRequest;
use crate::document::DocumentMetadata;

/// Durable storage for documents and their owned payloads.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List one page of documents, ordered by ascending id.
    ///
    /// A page past the last document yields an empty vector.
    async fn list_page(&self, page: PageRequest) -> Result<Vec<DocumentMetadata>, StoreError>;

    /// Fetch a document with its payload.
    async fn get_by_id(&self, id: i64) -> Result<Option<DocumentMetadata>, StoreError>;

    /// Fetch only the payload bytes of a document.
    async fn get_raw_bytes_by_id(&self, id: i64) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.get_by_id(id).await?.map(|doc| doc.file_bytes.file))
    }

    /// Persist a new document and its payload, returning the assigned id.
    ///
    /// Any ids already set on `metadata` are ignored.
    async fn insert(&self, metadata: DocumentMetadata) -> Result<i64, StoreError>;

    /// Replace the document stored under `id` with `metadata`.
    ///
    /// This is a raw replace: when `metadata.file_bytes.id` is set that payload
    /// row is overwritten in place, when it is `None` a new payload row is
    /// allocated. Returns [`StoreError::NotFound`] if no document has this id.
    async fn update(&self, id: i64, metadata: DocumentMetadata) -> Result<(), StoreError>;

    /// Delete a document together with its payload.
    ///
    /// Returns [`StoreError::NotFound`] if no document has this id.
    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;
}
