//! Shop Domain Concerns

pub mod carts;
pub mod catalog;
pub mod sessions;
pub mod signup;
