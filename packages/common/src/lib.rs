pub mod config;
pub mod interest_area;
pub mod material_type;
pub mod storage;
pub mod user_role;

pub use interest_area::InterestArea;
pub use material_type::MaterialType;
pub use user_role::UserRole;
