//! Sessions

pub mod models;
mod store;

pub use models::{Session, SessionId};
pub use store::*;
