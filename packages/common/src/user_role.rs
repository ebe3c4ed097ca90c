#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a platform user. Selects which profile supplies the user's interest areas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "MENTOR"))]
    Mentor,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "MENTORED"))]
    Mentored,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mentor => "MENTOR",
            Self::Mentored => "MENTORED",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MENTOR" => Ok(Self::Mentor),
            "MENTORED" => Ok(Self::Mentored),
            _ => Err(format!(
                "Invalid role '{s}'. Valid values: MENTOR, MENTORED"
            )),
        }
    }
}
