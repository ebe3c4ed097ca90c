//! Record-store collaborators consumed by the material lifecycle.

mod material;
mod user;

#[cfg(test)]
pub(crate) mod memory;

use async_trait::async_trait;
use common::InterestArea;
use sea_orm::DbErr;

use crate::models::material::{Material, NewMaterial};
use crate::models::user::UserAccount;

pub use material::SeaOrmMaterialStore;
pub use user::SeaOrmUserDirectory;

/// User lookup.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user and the interest areas of the profile matching their role.
    async fn find_user(&self, id: i32) -> Result<Option<UserAccount>, DbErr>;
}

/// Material record persistence.
#[async_trait]
pub trait MaterialStore: Send + Sync {
    /// Persist a new record and assign its id.
    async fn insert(&self, material: NewMaterial) -> Result<Material, DbErr>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Material>, DbErr>;

    /// Overwrite an existing record, tags included.
    async fn update(&self, material: Material) -> Result<Material, DbErr>;

    /// Returns `true` if a record was removed.
    async fn delete(&self, id: i32) -> Result<bool, DbErr>;

    /// All records in ascending id order.
    async fn list_all(&self) -> Result<Vec<Material>, DbErr>;

    /// Records tagged with `area`, in ascending id order.
    async fn find_by_area(&self, area: InterestArea) -> Result<Vec<Material>, DbErr>;

    /// Up to `limit` records, most recently created first.
    async fn most_recent(&self, limit: u64) -> Result<Vec<Material>, DbErr>;
}
