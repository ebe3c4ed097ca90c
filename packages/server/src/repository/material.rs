use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use common::InterestArea;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::MaterialStore;
use crate::entity::{material, material_interest_area};
use crate::models::material::{Material, NewMaterial};

/// [`MaterialStore`] backed by a SeaORM connection.
#[derive(Clone)]
pub struct SeaOrmMaterialStore {
    db: DatabaseConnection,
}

impl SeaOrmMaterialStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MaterialStore for SeaOrmMaterialStore {
    async fn insert(&self, new: NewMaterial) -> Result<Material, DbErr> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let model = material::ActiveModel {
            title: Set(new.title),
            material_type: Set(new.material_type),
            url: Set(new.url),
            stored_path: Set(path_to_string(new.stored_path.as_deref())),
            uploader_id: Set(new.uploader_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        replace_areas(&txn, model.id, &new.interest_areas).await?;
        txn.commit().await?;

        Ok(Material::from_model(model, new.interest_areas))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Material>, DbErr> {
        let Some(model) = material::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(with_areas(&self.db, vec![model]).await?.pop())
    }

    async fn update(&self, m: Material) -> Result<Material, DbErr> {
        let txn = self.db.begin().await?;

        let model = material::ActiveModel {
            id: Set(m.id),
            title: Set(m.title),
            material_type: Set(m.material_type),
            url: Set(m.url),
            stored_path: Set(path_to_string(m.stored_path.as_deref())),
            uploader_id: Set(m.uploader_id),
            created_at: Set(m.created_at),
            updated_at: Set(m.updated_at),
        }
        .update(&txn)
        .await?;

        replace_areas(&txn, model.id, &m.interest_areas).await?;
        txn.commit().await?;

        Ok(Material::from_model(model, m.interest_areas))
    }

    async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        material_interest_area::Entity::delete_many()
            .filter(material_interest_area::Column::MaterialId.eq(id))
            .exec(&txn)
            .await?;
        let result = material::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    async fn list_all(&self) -> Result<Vec<Material>, DbErr> {
        let models = material::Entity::find()
            .order_by_asc(material::Column::Id)
            .all(&self.db)
            .await?;
        with_areas(&self.db, models).await
    }

    async fn find_by_area(&self, area: InterestArea) -> Result<Vec<Material>, DbErr> {
        let ids: Vec<i32> = material_interest_area::Entity::find()
            .filter(material_interest_area::Column::Area.eq(area))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| row.material_id)
            .collect();

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = material::Entity::find()
            .filter(material::Column::Id.is_in(ids))
            .order_by_asc(material::Column::Id)
            .all(&self.db)
            .await?;
        with_areas(&self.db, models).await
    }

    async fn most_recent(&self, limit: u64) -> Result<Vec<Material>, DbErr> {
        let models = material::Entity::find()
            .order_by_desc(material::Column::CreatedAt)
            .order_by_desc(material::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;
        with_areas(&self.db, models).await
    }
}

fn path_to_string(path: Option<&std::path::Path>) -> Option<String> {
    path.map(|p| p.to_string_lossy().into_owned())
}

async fn replace_areas<C: ConnectionTrait>(
    db: &C,
    material_id: i32,
    areas: &[InterestArea],
) -> Result<(), DbErr> {
    material_interest_area::Entity::delete_many()
        .filter(material_interest_area::Column::MaterialId.eq(material_id))
        .exec(db)
        .await?;

    for (position, area) in areas.iter().enumerate() {
        material_interest_area::ActiveModel {
            material_id: Set(material_id),
            area: Set(*area),
            position: Set(position as i32),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

/// Load the tags of `models` in one query and pair them up, keeping model order.
async fn with_areas<C: ConnectionTrait>(
    db: &C,
    models: Vec<material::Model>,
) -> Result<Vec<Material>, DbErr> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let rows = material_interest_area::Entity::find()
        .filter(material_interest_area::Column::MaterialId.is_in(ids))
        .order_by_asc(material_interest_area::Column::MaterialId)
        .order_by_asc(material_interest_area::Column::Position)
        .all(db)
        .await?;

    let mut areas: HashMap<i32, Vec<InterestArea>> = HashMap::new();
    for row in rows {
        areas.entry(row.material_id).or_default().push(row.area);
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let tags = areas.remove(&model.id).unwrap_or_default();
            Material::from_model(model, tags)
        })
        .collect())
}
