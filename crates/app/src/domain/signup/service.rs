//! Signup credential validation and hashing.

use std::fmt;

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::domain::signup::errors::SignupError;

const MIN_PASSWORD_CHARS: usize = 8;
const SALT_BYTES: usize = 16;

/// Completed signup: the email and a salted Argon2 hash of the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    password_hash: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password_hash", &"**redacted**")
            .finish()
    }
}

/// Enforce the password policy: at least eight characters with an uppercase
/// letter, a digit and a special character.
///
/// # Errors
///
/// Returns [`SignupError::WeakPassword`] when any rule fails.
pub fn validate_password(password: &str) -> Result<(), SignupError> {
    let long_enough = password.chars().count() >= MIN_PASSWORD_CHARS;
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_alphanumeric() || c == '_');

    if long_enough && has_uppercase && has_digit && has_special {
        Ok(())
    } else {
        Err(SignupError::WeakPassword)
    }
}

/// Validate submitted credentials and hash the password.
///
/// The raw password is zeroed once hashed.
///
/// # Errors
///
/// Returns a validation error for missing or weak credentials, or
/// [`SignupError::Hashing`] if hashing fails.
pub fn register(
    email: Option<String>,
    password: Option<String>,
) -> Result<Registration, SignupError> {
    let email = email
        .map(|email| email.trim().to_owned())
        .filter(|email| !email.is_empty());

    let (Some(email), Some(mut password)) = (email, password.filter(|p| !p.is_empty())) else {
        return Err(SignupError::MissingCredentials);
    };

    let hashed = validate_password(&password).and_then(|()| hash_password(&password));

    password.zeroize();

    Ok(Registration {
        email,
        password_hash: hashed?,
    })
}

fn hash_password(password: &str) -> Result<String, SignupError> {
    let mut salt = [0_u8; SALT_BYTES];

    OsRng.fill_bytes(&mut salt);

    let salt = SaltString::encode_b64(&salt).map_err(SignupError::Hashing)?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(SignupError::Hashing)
}

#[cfg(test)]
mod tests {
    use argon2::{PasswordHash, PasswordVerifier};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn accepts_a_strong_password() {
        assert!(validate_password("Secreto1!").is_ok());
    }

    #[test]
    fn underscore_counts_as_special() {
        assert!(validate_password("Secreto1_").is_ok());
    }

    #[test]
    fn rejects_short_passwords() {
        assert!(matches!(
            validate_password("Sh0rt!"),
            Err(SignupError::WeakPassword)
        ));
    }

    #[test]
    fn rejects_missing_uppercase() {
        assert!(validate_password("secreto1!").is_err());
    }

    #[test]
    fn rejects_missing_digit() {
        assert!(validate_password("Secretos!").is_err());
    }

    #[test]
    fn rejects_missing_special_character() {
        assert!(validate_password("Secreto12").is_err());
    }

    #[test]
    fn missing_email_is_reported_before_password_rules() {
        let result = register(None, Some("weak".to_owned()));

        assert!(
            matches!(result, Err(SignupError::MissingCredentials)),
            "expected MissingCredentials, got {result:?}"
        );
    }

    #[test]
    fn blank_email_counts_as_missing() {
        let result = register(Some("   ".to_owned()), Some("Secreto1!".to_owned()));

        assert!(matches!(result, Err(SignupError::MissingCredentials)));
    }

    #[test]
    fn weak_password_is_a_validation_error() {
        let result = register(Some("ana@example.com".to_owned()), Some("password".to_owned()));

        assert!(result.as_ref().is_err_and(SignupError::is_validation));
    }

    #[test]
    fn stores_a_hash_not_the_password() -> TestResult {
        let registration = register(
            Some(" ana@example.com ".to_owned()),
            Some("Secreto1!".to_owned()),
        )?;

        assert_eq!(registration.email, "ana@example.com");
        assert!(!registration.password_hash.contains("Secreto1!"));
        assert!(registration.password_hash.starts_with("$argon2"));

        let verifies = |candidate: &str| {
            PasswordHash::new(&registration.password_hash).is_ok_and(|parsed| {
                Argon2::default()
                    .verify_password(candidate.as_bytes(), &parsed)
                    .is_ok()
            })
        };

        assert!(verifies("Secreto1!"));
        assert!(!verifies("Secreto2!"));

        Ok(())
    }

    #[test]
    fn debug_output_redacts_the_hash() -> TestResult {
        let registration = register(Some("ana@example.com".to_owned()), Some("Secreto1!".to_owned()))?;

        let debug = format!("{registration:?}");

        assert!(debug.contains("redacted"));
        assert!(!debug.contains("$argon2"));

        Ok(())
    }
}
