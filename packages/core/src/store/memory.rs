use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::error::StoreError;
use super::page::PageRequest;
use super::traits::DocumentStore;
use crate::document::{DocumentMetadata, FileBytes};

/// A metadata row; the payload lives in a separate table keyed by
/// `file_bytes_id`, mirroring the relational layout.
#[derive(Clone, Debug)]
struct MetadataRow {
    name: String,
    size: i64,
    content_type: String,
    creation_timestamp: DateTime<Utc>,
    file_bytes_id: i64,
}

#[derive(Debug, Default)]
struct Tables {
    metadata: BTreeMap<i64, MetadataRow>,
    file_bytes: BTreeMap<i64, Vec<u8>>,
    next_metadata_id: i64,
    next_file_bytes_id: i64,
}

impl Tables {
    fn allocate_metadata_id(&mut self) -> i64 {
        self.next_metadata_id += 1;
        self.next_metadata_id
    }

    fn allocate_file_bytes_id(&mut self) -> i64 {
        self.next_file_bytes_id += 1;
        self.next_file_bytes_id
    }

    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.metadata
            .iter()
            .any(|(id, row)| Some(*id) != except && row.name == name)
    }

    fn file_bytes_owner(&self, file_bytes_id: i64) -> Option<i64> {
        self.metadata
            .iter()
            .find(|(_, row)| row.file_bytes_id == file_bytes_id)
            .map(|(id, _)| *id)
    }

    fn assemble(&self, id: i64, row: &MetadataRow) -> Result<DocumentMetadata, StoreError> {
        let file = self.file_bytes.get(&row.file_bytes_id).ok_or_else(|| {
            StoreError::Backend(format!(
                "document {id} references missing payload {}",
                row.file_bytes_id
            ))
        })?;
        Ok(DocumentMetadata {
            id: Some(id),
            name: row.name.clone(),
            size: row.size,
            content_type: row.content_type.clone(),
            creation_timestamp: row.creation_timestamp,
            file_bytes: FileBytes {
                id: Some(row.file_bytes_id),
                file: file.clone(),
            },
        })
    }
}

/// Process-local [`DocumentStore`] with the same uniqueness rules as the
/// relational backend: document names are unique and each payload row is
/// owned by at most one document.
///
/// Writers are serialised behind a single lock.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    tables: RwLock<Tables>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of payload rows currently stored, including orphans.
    pub async fn file_bytes_count(&self) -> usize {
        self.tables.read().await.file_bytes.len()
    }

    /// Number of documents currently stored.
    pub async fn len(&self) -> usize {
        self.tables.read().await.metadata.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list_page(&self, page: PageRequest) -> Result<Vec<DocumentMetadata>, StoreError> {
        let tables = self.tables.read().await;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        tables
            .metadata
            .iter()
            .skip(offset)
            .take(limit)
            .map(|(id, row)| tables.assemble(*id, row))
            .collect()
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<DocumentMetadata>, StoreError> {
        let tables = self.tables.read().await;
        tables
            .metadata
            .get(&id)
            .map(|row| tables.assemble(id, row))
            .transpose()
    }

    async fn get_raw_bytes_by_id(&self, id: i64) -> Result<Option<Vec<u8>>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .metadata
            .get(&id)
            .and_then(|row| tables.file_bytes.get(&row.file_bytes_id))
            .cloned())
    }

    async fn insert(&self, metadata: DocumentMetadata) -> Result<i64, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.name_taken(&metadata.name, None) {
            return Err(StoreError::ConstraintViolation(format!(
                "document name \"{}\" already exists",
                metadata.name
            )));
        }

        let file_bytes_id = tables.allocate_file_bytes_id();
        tables
            .file_bytes
            .insert(file_bytes_id, metadata.file_bytes.file);

        let id = tables.allocate_metadata_id();
        tables.metadata.insert(
            id,
            MetadataRow {
                name: metadata.name,
                size: metadata.size,
                content_type: metadata.content_type,
                creation_timestamp: metadata.creation_timestamp,
                file_bytes_id,
            },
        );

        Ok(id)
    }

    async fn update(&self, id: i64, metadata: DocumentMetadata) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.metadata.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        if tables.name_taken(&metadata.name, Some(id)) {
            return Err(StoreError::ConstraintViolation(format!(
                "document name \"{}\" already exists",
                metadata.name
            )));
        }

        let file_bytes_id = match metadata.file_bytes.id {
            Some(file_bytes_id) => {
                if !tables.file_bytes.contains_key(&file_bytes_id) {
                    return Err(StoreError::NotFound(id));
                }
                if let Some(owner) = tables.file_bytes_owner(file_bytes_id)
                    && owner != id
                {
                    return Err(StoreError::ConstraintViolation(format!(
                        "payload {file_bytes_id} is owned by document {owner}"
                    )));
                }
                file_bytes_id
            }
            None => tables.allocate_file_bytes_id(),
        };
        tables
            .file_bytes
            .insert(file_bytes_id, metadata.file_bytes.file);

        tables.metadata.insert(
            id,
            MetadataRow {
                name: metadata.name,
                size: metadata.size,
                content_type: metadata.content_type,
                creation_timestamp: metadata.creation_timestamp,
                file_bytes_id,
            },
        );

        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;

        let row = tables.metadata.remove(&id).ok_or(StoreError::NotFound(id))?;
        tables.file_bytes.remove(&row.file_bytes_id);

        Ok(())
    }
}
