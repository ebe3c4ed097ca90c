use common::{InterestArea, UserRole};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Interest area listed on a user's mentor or mentored profile.
///
/// Only rows whose `profile` matches the user's current role are read.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile_interest_area")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub user_id: i32,

    pub profile: UserRole,

    pub area: InterestArea,

    pub position: i32,
}

impl ActiveModelBehavior for ActiveModel {}
