use async_trait::async_trait;
use document_core::{DocumentMetadata, DocumentStore, FileBytes, PageRequest, StoreError};
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IsolationLevel, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};

use crate::entity::{document_metadata, file_bytes};

/// [`DocumentStore`] backed by a relational database through SeaORM.
///
/// Metadata and payload live in separate tables; writes touch both inside a
/// single READ COMMITTED transaction.
#[derive(Clone)]
pub struct SeaOrmDocumentStore {
    db: DatabaseConnection,
}

impl SeaOrmDocumentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn begin_write(&self) -> Result<DatabaseTransaction, DbErr> {
        self.db
            .begin_with_config(Some(IsolationLevel::ReadCommitted), None)
            .await
    }

    /// Rows whose payload is gone (a delete committed concurrently) are
    /// treated as absent.
    async fn load_page(&self, page: PageRequest) -> Result<Vec<DocumentMetadata>, DbErr> {
        let rows = document_metadata::Entity::find()
            .find_also_related(file_bytes::Entity)
            .order_by_asc(document_metadata::Column::Id)
            .offset(page.offset().min(i64::MAX as u64))
            .limit(page.limit().min(i64::MAX as u64))
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(row, payload)| Some(into_document(row, payload?)))
            .collect())
    }

    async fn load_document(&self, id: i64) -> Result<Option<DocumentMetadata>, DbErr> {
        let found = document_metadata::Entity::find_by_id(id)
            .find_also_related(file_bytes::Entity)
            .one(&self.db)
            .await?;

        Ok(found.and_then(|(row, payload)| Some(into_document(row, payload?))))
    }

    async fn insert_document(&self, metadata: DocumentMetadata) -> Result<i64, DbErr> {
        let txn = self.begin_write().await?;

        let payload = file_bytes::ActiveModel {
            file: Set(metadata.file_bytes.file),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let row = document_metadata::ActiveModel {
            name: Set(metadata.name),
            size: Set(metadata.size),
            content_type: Set(metadata.content_type),
            creation_timestamp: Set(metadata.creation_timestamp),
            file_bytes_id: Set(payload.id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(row.id)
    }

    /// Returns `false` when no document has this id.
    async fn replace_document(&self, id: i64, metadata: DocumentMetadata) -> Result<bool, DbErr> {
        let txn = self.begin_write().await?;

        let existing = document_metadata::Entity::find_by_id(id)
            .lock(LockType::Update)
            .one(&txn)
            .await?;
        if existing.is_none() {
            return Ok(false);
        }

        let file_bytes_id = match metadata.file_bytes.id {
            Some(file_bytes_id) => {
                file_bytes::ActiveModel {
                    id: ActiveValue::Unchanged(file_bytes_id),
                    file: Set(metadata.file_bytes.file),
                }
                .update(&txn)
                .await?;
                file_bytes_id
            }
            None => {
                file_bytes::ActiveModel {
                    file: Set(metadata.file_bytes.file),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
                .id
            }
        };

        document_metadata::ActiveModel {
            id: ActiveValue::Unchanged(id),
            name: Set(metadata.name),
            size: Set(metadata.size),
            content_type: Set(metadata.content_type),
            creation_timestamp: Set(metadata.creation_timestamp),
            file_bytes_id: Set(file_bytes_id),
        }
        .update(&txn)
        .await?;

        txn.commit().await?;
        Ok(true)
    }

    /// Returns `false` when no document has this id.
    async fn remove_document(&self, id: i64) -> Result<bool, DbErr> {
        let txn = self.begin_write().await?;

        let Some(existing) = document_metadata::Entity::find_by_id(id)
            .lock(LockType::Update)
            .one(&txn)
            .await?
        else {
            return Ok(false);
        };

        document_metadata::Entity::delete_by_id(id)
            .exec(&txn)
            .await?;
        file_bytes::Entity::delete_by_id(existing.file_bytes_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(true)
    }
}

#[async_trait]
impl DocumentStore for SeaOrmDocumentStore {
    async fn list_page(&self, page: PageRequest) -> Result<Vec<DocumentMetadata>, StoreError> {
        self.load_page(page).await.map_err(classify)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<DocumentMetadata>, StoreError> {
        self.load_document(id).await.map_err(classify)
    }

    async fn get_raw_bytes_by_id(&self, id: i64) -> Result<Option<Vec<u8>>, StoreError> {
        let document = self.load_document(id).await.map_err(classify)?;
        Ok(document.map(|document| document.file_bytes.file))
    }

    async fn insert(&self, metadata: DocumentMetadata) -> Result<i64, StoreError> {
        self.insert_document(metadata).await.map_err(classify)
    }

    async fn update(&self, id: i64, metadata: DocumentMetadata) -> Result<(), StoreError> {
        match self.replace_document(id, metadata).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(StoreError::NotFound(id)),
            Err(err) => Err(classify_write(id, err)),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        match self.remove_document(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(StoreError::NotFound(id)),
            Err(err) => Err(classify_write(id, err)),
        }
    }
}

fn into_document(row: document_metadata::Model, payload: file_bytes::Model) -> DocumentMetadata {
    DocumentMetadata {
        id: Some(row.id),
        name: row.name,
        size: row.size,
        content_type: row.content_type,
        creation_timestamp: row.creation_timestamp,
        file_bytes: FileBytes {
            id: Some(payload.id),
            file: payload.file,
        },
    }
}

/// Integrity violations become [`StoreError::ConstraintViolation`]; every
/// other database error is a backend failure.
fn classify(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail))
        | Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            StoreError::ConstraintViolation(detail)
        }
        _ => StoreError::Backend(err.to_string()),
    }
}

/// Like [`classify`], but a write that matched no row means document `id`
/// was deleted underneath it.
fn classify_write(id: i64, err: DbErr) -> StoreError {
    match err {
        DbErr::RecordNotUpdated => StoreError::NotFound(id),
        err => classify(err),
    }
}
