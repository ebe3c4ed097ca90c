use common::InterestArea;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One interest-area tag of a material.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "material_interest_area")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub material_id: i32,

    #[sea_orm(indexed)]
    pub area: InterestArea,

    /// Keeps tags in the order they were given.
    pub position: i32,
}

impl ActiveModelBehavior for ActiveModel {}
