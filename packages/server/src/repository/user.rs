use async_trait::async_trait;
use chrono::Utc;
use common::{InterestArea, UserRole};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::UserDirectory;
use crate::entity::{profile_interest_area, user};
use crate::models::user::UserAccount;

/// [`UserDirectory`] backed by a SeaORM connection.
#[derive(Clone)]
pub struct SeaOrmUserDirectory {
    db: DatabaseConnection,
}

impl SeaOrmUserDirectory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a user whose profile for `role` lists `areas`.
    pub async fn register(
        &self,
        username: &str,
        role: UserRole,
        areas: &[InterestArea],
    ) -> Result<UserAccount, DbErr> {
        let txn = self.db.begin().await?;

        let model = user::ActiveModel {
            username: Set(username.trim().to_string()),
            role: Set(role),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let areas = common::interest_area::dedup_areas(areas.iter().copied());
        set_profile_areas(&txn, model.id, role, &areas).await?;
        txn.commit().await?;

        Ok(UserAccount {
            id: model.id,
            username: model.username,
            role: model.role,
            interest_areas: areas,
        })
    }

    /// Replace the interest areas listed on one of a user's profiles.
    pub async fn set_profile_areas(
        &self,
        user_id: i32,
        profile: UserRole,
        areas: &[InterestArea],
    ) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;
        let areas = common::interest_area::dedup_areas(areas.iter().copied());
        set_profile_areas(&txn, user_id, profile, &areas).await?;
        txn.commit().await
    }
}

#[async_trait]
impl UserDirectory for SeaOrmUserDirectory {
    async fn find_user(&self, id: i32) -> Result<Option<UserAccount>, DbErr> {
        let Some(model) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let interest_areas = profile_interest_area::Entity::find()
            .filter(profile_interest_area::Column::UserId.eq(model.id))
            .filter(profile_interest_area::Column::Profile.eq(model.role))
            .order_by_asc(profile_interest_area::Column::Position)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| row.area)
            .collect();

        Ok(Some(UserAccount {
            id: model.id,
            username: model.username,
            role: model.role,
            interest_areas,
        }))
    }
}

async fn set_profile_areas<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    profile: UserRole,
    areas: &[InterestArea],
) -> Result<(), DbErr> {
    profile_interest_area::Entity::delete_many()
        .filter(profile_interest_area::Column::UserId.eq(user_id))
        .filter(profile_interest_area::Column::Profile.eq(profile))
        .exec(db)
        .await?;

    for (position, area) in areas.iter().enumerate() {
        profile_interest_area::ActiveModel {
            user_id: Set(user_id),
            profile: Set(profile),
            area: Set(*area),
            position: Set(position as i32),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}
