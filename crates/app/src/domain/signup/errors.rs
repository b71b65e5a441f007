//! Signup errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignupError {
    #[error("Please enter a valid email and password.")]
    MissingCredentials,

    #[error(
        "The password must be at least 8 characters long and include an uppercase letter, a number and a special character."
    )]
    WeakPassword,

    #[error("failed to hash password: {0}")]
    Hashing(argon2::password_hash::Error),
}

impl SignupError {
    /// Whether the user can fix this by resubmitting the form.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingCredentials | Self::WeakPassword)
    }
}
