pub mod material;

pub use material::MaterialService;
