use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use common::InterestArea;
use common::interest_area::dedup_areas;
use common::storage::{StorageGuard, Upload, WriteMode};
use tracing::{debug, info, instrument, warn};

use crate::config::SuggestionConfig;
use crate::error::MaterialError;
use crate::models::material::{Material, MaterialDraft, NewMaterial};
use crate::repository::{MaterialStore, UserDirectory};

/// Keeps material records and their backing files consistent.
///
/// Every file operation goes through the [`StorageGuard`]; records go through
/// the [`MaterialStore`]. A file is always written before the record that
/// points at it is committed, and a file written by a call whose record
/// commit fails is removed again.
#[derive(Clone)]
pub struct MaterialService {
    guard: Arc<StorageGuard>,
    materials: Arc<dyn MaterialStore>,
    users: Arc<dyn UserDirectory>,
    suggestion: SuggestionConfig,
}

impl MaterialService {
    pub fn new(
        guard: Arc<StorageGuard>,
        materials: Arc<dyn MaterialStore>,
        users: Arc<dyn UserDirectory>,
        suggestion: SuggestionConfig,
    ) -> Self {
        Self {
            guard,
            materials,
            users,
            suggestion,
        }
    }

    pub fn guard(&self) -> &StorageGuard {
        &self.guard
    }

    /// Create a material, storing `upload` first when the type takes a file.
    ///
    /// Links never get a stored path; an attached upload is ignored. A file
    /// type without an upload, or with an empty one, is created without a path.
    #[instrument(skip(self, draft, upload), fields(material_type = %draft.material_type))]
    pub async fn create(
        &self,
        draft: MaterialDraft,
        uploader_id: i32,
        upload: Option<Upload>,
    ) -> Result<Material, MaterialError> {
        if self.users.find_user(uploader_id).await?.is_none() {
            return Err(MaterialError::user_not_found(uploader_id));
        }

        let stored_path = match upload {
            Some(upload) if draft.material_type.requires_file() => {
                match non_empty(upload).await? {
                    Some(upload) => {
                        let stored = self.guard.ingest(upload, WriteMode::CreateNew).await?;
                        Some(stored.path)
                    }
                    None => None,
                }
            }
            Some(upload) => {
                debug!(filename = %upload.filename, "Ignoring file attached to a link");
                None
            }
            None => None,
        };

        let new = NewMaterial {
            title: draft.title,
            material_type: draft.material_type,
            url: draft.url,
            stored_path: stored_path.clone(),
            interest_areas: dedup_areas(draft.interest_areas),
            uploader_id,
        };

        let material = match self.materials.insert(new).await {
            Ok(material) => material,
            Err(e) => {
                self.discard(stored_path.as_deref()).await;
                return Err(e.into());
            }
        };

        info!(material_id = material.id, "Created material");
        Ok(material)
    }

    /// Replace a material's metadata and, depending on its new type, its file.
    ///
    /// Switching to a link removes the old file once the record no longer
    /// points at it. A new upload for a file type is validated, then the old
    /// file is deleted and the new one written. Without an upload, or with an
    /// empty one, the stored path is kept.
    #[instrument(skip(self, draft, upload), fields(material_type = %draft.material_type))]
    pub async fn update(
        &self,
        id: i32,
        draft: MaterialDraft,
        upload: Option<Upload>,
    ) -> Result<Material, MaterialError> {
        let existing = self
            .materials
            .find_by_id(id)
            .await?
            .ok_or_else(|| MaterialError::material_not_found(id))?;

        let upload = match upload {
            Some(upload) if draft.material_type.requires_file() => non_empty(upload).await?,
            other => other,
        };

        let mut written: Option<PathBuf> = None;
        let mut orphaned: Option<PathBuf> = None;

        let stored_path = if !draft.material_type.requires_file() {
            if upload.is_some() {
                debug!(material_id = id, "Ignoring file attached to a link");
            }
            orphaned = existing.stored_path.clone();
            None
        } else if let Some(upload) = upload {
            let prepared = self
                .guard
                .prepare(&upload.filename, upload.declared_size)?;

            if let Some(old) = &existing.stored_path {
                self.guard.delete_if_within_root(old).await;
            }

            match self
                .guard
                .write(prepared, upload.reader, WriteMode::CreateNew)
                .await
            {
                Ok(stored) => {
                    written = Some(stored.path.clone());
                    Some(stored.path)
                }
                Err(e) => {
                    if existing.stored_path.is_some() {
                        self.clear_stored_path(existing).await;
                    }
                    return Err(e.into());
                }
            }
        } else {
            existing.stored_path.clone()
        };

        let updated = Material {
            id: existing.id,
            title: draft.title,
            material_type: draft.material_type,
            url: draft.url,
            stored_path,
            interest_areas: dedup_areas(draft.interest_areas),
            uploader_id: existing.uploader_id,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        let material = match self.materials.update(updated).await {
            Ok(material) => material,
            Err(e) => {
                self.discard(written.as_deref()).await;
                return Err(e.into());
            }
        };

        if let Some(old) = orphaned {
            self.guard.delete_if_within_root(&old).await;
        }

        info!(material_id = id, "Updated material");
        Ok(material)
    }

    /// Delete a material. The backing file is removed best-effort first; the
    /// record is deleted regardless of the outcome.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), MaterialError> {
        let existing = self
            .materials
            .find_by_id(id)
            .await?
            .ok_or_else(|| MaterialError::material_not_found(id))?;

        if let Some(path) = &existing.stored_path {
            self.guard.delete_if_within_root(path).await;
        }

        if !self.materials.delete(id).await? {
            return Err(MaterialError::material_not_found(id));
        }

        info!(material_id = id, "Deleted material");
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<Material, MaterialError> {
        self.materials
            .find_by_id(id)
            .await?
            .ok_or_else(|| MaterialError::material_not_found(id))
    }

    pub async fn list_all(&self) -> Result<Vec<Material>, MaterialError> {
        Ok(self.materials.list_all().await?)
    }

    /// Suggest materials for a user from the interest areas of their profile.
    ///
    /// A user without interest areas gets the `recent_fallback` most recent
    /// materials instead, regardless of `limit`. Otherwise the result is the union of the materials tagged with each
    /// area, in first-matched order, truncated to `limit`.
    #[instrument(skip(self))]
    pub async fn suggest(
        &self,
        user_id: i32,
        limit: Option<usize>,
    ) -> Result<Vec<Material>, MaterialError> {
        let user = self
            .users
            .find_user(user_id)
            .await?
            .ok_or_else(|| MaterialError::user_not_found(user_id))?;
        let limit = limit.unwrap_or(self.suggestion.limit);

        if user.interest_areas.is_empty() {
            let count = self.suggestion.recent_fallback;
            debug!(count, "User has no interest areas, suggesting recent materials");
            return Ok(self.materials.most_recent(count as u64).await?);
        }

        let mut matches = self.union_by_areas(&user.interest_areas).await?;
        matches.truncate(limit);
        debug!(count = matches.len(), "Suggested materials");
        Ok(matches)
    }

    /// All materials tagged with any of `areas`, or every material when
    /// `areas` is empty. No limit applies.
    pub async fn list_by_areas(
        &self,
        areas: &[InterestArea],
    ) -> Result<Vec<Material>, MaterialError> {
        if areas.is_empty() {
            return self.list_all().await;
        }
        self.union_by_areas(areas).await
    }

    async fn union_by_areas(&self, areas: &[InterestArea]) -> Result<Vec<Material>, MaterialError> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for area in dedup_areas(areas.iter().copied()) {
            for material in self.materials.find_by_area(area).await? {
                if seen.insert(material.id) {
                    out.push(material);
                }
            }
        }
        Ok(out)
    }

    /// Remove a file written by a call that is about to fail.
    async fn discard(&self, path: Option<&std::path::Path>) {
        if let Some(path) = path {
            warn!(path = %path.display(), "Removing file of a record that was not saved");
            self.guard.delete_if_within_root(path).await;
        }
    }

    /// The old file of `material` is gone; stop the record pointing at it.
    async fn clear_stored_path(&self, mut material: Material) {
        let id = material.id;
        material.stored_path = None;
        material.updated_at = Utc::now();
        if let Err(e) = self.materials.update(material).await {
            warn!(material_id = id, error = %e, "Failed to clear stored path after a failed replacement");
        }
    }
}

/// An upload without bytes counts as no upload at all.
async fn non_empty(upload: Upload) -> Result<Option<Upload>, MaterialError> {
    let filename = upload.filename.clone();
    let upload = upload.non_empty().await.map_err(MaterialError::IoFailure)?;
    if upload.is_none() {
        debug!(filename = %filename, "Ignoring empty upload");
    }
    Ok(upload)
}
