//! Catalog

pub mod errors;
pub mod models;
mod repository;

pub use errors::CatalogError;
pub use repository::*;
