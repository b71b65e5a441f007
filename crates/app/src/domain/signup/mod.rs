//! Signup

pub mod errors;
mod service;

pub use errors::SignupError;
pub use service::*;
