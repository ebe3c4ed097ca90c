pub mod material;
pub mod material_interest_area;
pub mod profile_interest_area;
pub mod user;
