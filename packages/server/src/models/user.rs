use common::{InterestArea, UserRole};
use serde::{Deserialize, Serialize};

/// A platform user as seen by the material lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
    /// Areas from the profile matching `role`. Empty if that profile lists none.
    pub interest_areas: Vec<InterestArea>,
}
