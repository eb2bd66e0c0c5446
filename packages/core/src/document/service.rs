use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{info, instrument, warn};

use super::error::{DocumentError, DocumentResult};
use super::model::{DocumentMetadata, DocumentMetadataView, UserDocument};
use crate::store::{DocumentStore, PageRequest, StoreError};

/// Orchestrates a [`DocumentStore`] and translates its failures into
/// [`DocumentError`]s.
///
/// Holds no state of its own; cloning shares the underlying store.
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// List one page of document metadata.
    ///
    /// A negative page number, a non-positive limit or a page past the end
    /// all yield an empty vector.
    #[instrument(skip(self))]
    pub async fn get_page(
        &self,
        page_number: i64,
        limit: i64,
    ) -> DocumentResult<Vec<DocumentMetadataView>> {
        let Some(page) = PageRequest::new(page_number, limit) else {
            return Ok(Vec::new());
        };

        let documents = self
            .store
            .list_page(page)
            .await
            .map_err(DocumentError::Storage)?;

        Ok(documents
            .iter()
            .filter_map(DocumentMetadataView::from_metadata)
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_metadata_by_id(&self, id: i64) -> DocumentResult<DocumentMetadataView> {
        self.store
            .get_by_id(id)
            .await
            .map_err(DocumentError::Storage)?
            .as_ref()
            .and_then(DocumentMetadataView::from_metadata)
            .ok_or(DocumentError::NotFound(id))
    }

    /// Payload of a document, base64-encoded (standard alphabet, padded).
    #[instrument(skip(self))]
    pub async fn get_encoded_bytes(&self, id: i64) -> DocumentResult<String> {
        let bytes = self
            .store
            .get_raw_bytes_by_id(id)
            .await
            .map_err(DocumentError::Storage)?
            .ok_or(DocumentError::NotFound(id))?;

        Ok(STANDARD.encode(bytes))
    }

    /// Store a new document.
    ///
    /// The assigned id is logged but not returned; callers find the document
    /// again through [`get_page`](Self::get_page).
    #[instrument(skip(self, document), fields(name = %document.name))]
    pub async fn save_document(&self, document: UserDocument) -> DocumentResult<()> {
        let new_id = self
            .store
            .insert(DocumentMetadata::from(document))
            .await
            .map_err(write_error)?;

        info!("Added new Document with Id \"{new_id}\".");
        Ok(())
    }

    /// Replace the content of an existing document.
    ///
    /// The existing payload row is reused so the update never leaves an
    /// orphaned payload behind. The lookup and the write are separate store
    /// calls; a concurrent delete in between surfaces as `NotFound`.
    #[instrument(skip(self, document), fields(name = %document.name))]
    pub async fn update_document(&self, id: i64, document: UserDocument) -> DocumentResult<()> {
        let existing = self
            .store
            .get_by_id(id)
            .await
            .map_err(DocumentError::Storage)?
            .ok_or(DocumentError::NotFound(id))?;

        let mut replacement = DocumentMetadata::from(document);
        replacement.id = Some(id);
        replacement.file_bytes.id = existing.file_bytes.id;

        self.store
            .update(id, replacement)
            .await
            .map_err(write_error)?;

        info!("Updated Document with Id \"{id}\".");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_document(&self, id: i64) -> DocumentResult<()> {
        self.store.delete_by_id(id).await.map_err(write_error)?;

        info!("Deleted Document with Id \"{id}\".");
        Ok(())
    }
}

fn write_error(err: StoreError) -> DocumentError {
    match err {
        StoreError::NotFound(id) => DocumentError::NotFound(id),
        StoreError::ConstraintViolation(reason) => {
            warn!("Rejected write: {reason}");
            DocumentError::Duplicate(reason)
        }
        other => DocumentError::Storage(other),
    }
}
