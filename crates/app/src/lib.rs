//! Shop domain: catalog, carts, sessions, signup and both checkout paths.

pub mod checkout;
pub mod context;
pub mod domain;
pub mod notifications;
pub mod payments;

mod uuids;

pub use uuids::TypedUuid;
