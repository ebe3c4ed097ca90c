#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of learning material.
///
/// The kind decides whether a material is backed by a stored file. When the
/// `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialType {
    /// External link. Never backed by a stored file.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "LINK"))]
    Link,
    /// Document upload (pdf, doc, txt, images).
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "DOCUMENT"))]
    Document,
    /// Video upload.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "VIDEO"))]
    Video,
}

impl MaterialType {
    pub const ALL: &'static [MaterialType] = &[Self::Link, Self::Document, Self::Video];

    /// Returns true if materials of this kind carry an uploaded file.
    pub fn requires_file(&self) -> bool {
        matches!(self, Self::Document | Self::Video)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Link => "LINK",
            Self::Document => "DOCUMENT",
            Self::Video => "VIDEO",
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an unknown material type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMaterialTypeError {
    invalid: String,
}

impl fmt::Display for ParseMaterialTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid material type '{}'. Valid values: {}",
            self.invalid,
            MaterialType::ALL
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseMaterialTypeError {}

impl FromStr for MaterialType {
    type Err = ParseMaterialTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseMaterialTypeError {
                invalid: s.to_string(),
            })
    }
}
