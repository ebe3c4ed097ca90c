pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod state;
