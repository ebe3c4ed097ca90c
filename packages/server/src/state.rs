use std::sync::Arc;

use anyhow::Context;
use common::storage::StorageGuard;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::AppConfig;
use crate::database::init_db;
use crate::repository::{SeaOrmMaterialStore, SeaOrmUserDirectory};
use crate::service::MaterialService;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub materials: MaterialService,
    pub users: SeaOrmUserDirectory,
}

impl AppState {
    /// Validate `config`, prepare the upload root, connect the database and
    /// wire the material service. Any failure here is fatal for the process.
    pub async fn bootstrap(config: &AppConfig) -> anyhow::Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

        let guard = StorageGuard::new(&config.upload).context("invalid upload configuration")?;
        guard.ensure_root_exists().await.with_context(|| {
            format!("cannot create upload root {}", guard.root().display())
        })?;

        let db = init_db(&config.database)
            .await
            .context("failed to initialize database")?;
        info!("Database connected");

        Ok(Self::from_parts(db, guard, config))
    }

    /// Wire the service over an existing connection and a ready guard.
    pub fn from_parts(db: DatabaseConnection, guard: StorageGuard, config: &AppConfig) -> Self {
        let users = SeaOrmUserDirectory::new(db.clone());
        let materials = MaterialService::new(
            Arc::new(guard),
            Arc::new(SeaOrmMaterialStore::new(db.clone())),
            Arc::new(users.clone()),
            config.suggestion.clone(),
        );
        Self {
            db,
            materials,
            users,
        }
    }
}
