use std::path::PathBuf;

use chrono::{DateTime, Utc};
use common::{InterestArea, MaterialType};
use serde::{Deserialize, Serialize};

use crate::entity::material;

/// A learning material together with its interest-area tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: i32,
    pub title: String,
    pub material_type: MaterialType,
    pub url: Option<String>,
    /// Absolute path below the upload root. Present only for file-backed kinds
    /// whose file was stored.
    pub stored_path: Option<PathBuf>,
    pub interest_areas: Vec<InterestArea>,
    pub uploader_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Material {
    pub(crate) fn from_model(model: material::Model, interest_areas: Vec<InterestArea>) -> Self {
        Self {
            id: model.id,
            title: model.title,
            material_type: model.material_type,
            url: model.url,
            stored_path: model.stored_path.map(PathBuf::from),
            interest_areas,
            uploader_id: model.uploader_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Caller-supplied metadata for creating or updating a material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialDraft {
    pub title: String,
    pub material_type: MaterialType,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub interest_areas: Vec<InterestArea>,
}

impl MaterialDraft {
    pub fn new(title: impl Into<String>, material_type: MaterialType) -> Self {
        Self {
            title: title.into(),
            material_type,
            url: None,
            interest_areas: Vec::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_areas(mut self, areas: impl IntoIterator<Item = InterestArea>) -> Self {
        self.interest_areas = areas.into_iter().collect();
        self
    }
}

/// A material record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaterial {
    pub title: String,
    pub material_type: MaterialType,
    pub url: Option<String>,
    pub stored_path: Option<PathBuf>,
    pub interest_areas: Vec<InterestArea>,
    pub uploader_id: i32,
}
