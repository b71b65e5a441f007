//! Session Models

use crate::{
    domain::{carts::Cart, signup::Registration},
    uuids::TypedUuid,
};

/// Client-held session token.
pub type SessionId = TypedUuid<Session>;

/// State scoped to one browser session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub cart: Cart,
    pub registration: Option<Registration>,
}

impl Session {
    pub fn is_signed_up(&self) -> bool {
        self.registration.is_some()
    }

    /// The email captured at signup, used as the payer for gateway checkouts.
    pub fn email(&self) -> Option<&str> {
        self.registration
            .as_ref()
            .map(|registration| registration.email.as_str())
    }
}
