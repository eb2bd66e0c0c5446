use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_metadata")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Original upload filename; the logical key of a document.
    #[sea_orm(unique)]
    pub name: String,

    /// Payload size in bytes.
    pub size: i64,

    /// MIME content type.
    pub content_type: String,

    pub creation_timestamp: DateTimeUtc,

    /// Each payload row belongs to exactly one document.
    #[sea_orm(unique)]
    pub file_bytes_id: i64,
    #[sea_orm(belongs_to, from = "file_bytes_id", to = "id")]
    pub file_bytes: HasOne<super::file_bytes::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
