pub mod material;
pub mod user;
