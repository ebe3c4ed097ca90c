//! In-memory collaborators for lifecycle tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use common::{InterestArea, UserRole};
use sea_orm::DbErr;

use super::{MaterialStore, UserDirectory};
use crate::models::material::{Material, NewMaterial};
use crate::models::user::UserAccount;

#[derive(Default)]
pub(crate) struct InMemoryMaterialStore {
    rows: Mutex<BTreeMap<i32, Material>>,
    next_id: Mutex<i32>,
    fail_writes: AtomicBool,
}

impl InMemoryMaterialStore {
    /// Make every following insert and update fail.
    pub(crate) fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check_writable(&self) -> Result<(), DbErr> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DbErr::Custom("write rejected".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl MaterialStore for InMemoryMaterialStore {
    async fn insert(&self, new: NewMaterial) -> Result<Material, DbErr> {
        self.check_writable()?;
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        let now = Utc::now();
        let material = Material {
            id,
            title: new.title,
            material_type: new.material_type,
            url: new.url,
            stored_path: new.stored_path,
            interest_areas: new.interest_areas,
            uploader_id: new.uploader_id,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(id, material.clone());
        Ok(material)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Material>, DbErr> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn update(&self, material: Material) -> Result<Material, DbErr> {
        self.check_writable()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&material.id) {
            Some(row) => {
                *row = material.clone();
                Ok(material)
            }
            None => Err(DbErr::RecordNotUpdated),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn list_all(&self) -> Result<Vec<Material>, DbErr> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_area(&self, area: InterestArea) -> Result<Vec<Material>, DbErr> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.interest_areas.contains(&area))
            .cloned()
            .collect())
    }

    async fn most_recent(&self, limit: u64) -> Result<Vec<Material>, DbErr> {
        let mut all: Vec<Material> = self.rows.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        all.truncate(limit as usize);
        Ok(all)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryUserDirectory {
    users: Mutex<HashMap<i32, UserAccount>>,
}

impl InMemoryUserDirectory {
    pub(crate) fn add(&self, id: i32, role: UserRole, areas: &[InterestArea]) {
        self.users.lock().unwrap().insert(
            id,
            UserAccount {
                id,
                username: format!("user{id}"),
                role,
                interest_areas: areas.to_vec(),
            },
        );
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, id: i32) -> Result<Option<UserAccount>, DbErr> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }
}
