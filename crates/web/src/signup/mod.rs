//! Signup: the credential form and the guard that requires it.

pub(crate) mod guard;
pub(crate) mod handlers;
