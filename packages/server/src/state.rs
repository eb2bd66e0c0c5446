use std::sync::Arc;

use document_core::{DocumentService, DocumentStore};
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::store::SeaOrmDocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub documents: DocumentService,
    pub config: AppConfig,
}

impl AppState {
    /// State backed by the relational document store.
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Self {
        Self::with_store(config, Arc::new(SeaOrmDocumentStore::new(db)))
    }

    pub fn with_store(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            documents: DocumentService::new(store),
            config,
        }
    }
}
