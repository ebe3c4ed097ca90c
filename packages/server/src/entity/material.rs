use common::MaterialType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "material")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    #[sea_orm(indexed)]
    pub material_type: MaterialType,

    /// External address for link materials.
    #[sea_orm(column_type = "Text")]
    pub url: Option<String>,

    /// Absolute path below the upload root. Always `None` for links.
    #[sea_orm(column_type = "Text")]
    pub stored_path: Option<String>,

    /// Set once on creation.
    #[sea_orm(indexed)]
    pub uploader_id: i32,

    #[sea_orm(indexed)]
    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
