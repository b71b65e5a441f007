//! Carts

pub mod models;
pub mod projection;

pub use models::{Cart, QuantityChange};
pub use projection::{CartProjection, LineItem, project};
