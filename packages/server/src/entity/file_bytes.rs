use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "file_bytes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub file: Vec<u8>,

    #[sea_orm(has_one)]
    pub document: HasOne<super::document_metadata::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
