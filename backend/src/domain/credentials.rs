//! Signup credentials and stored secret digests.
//!
//! Secrets arrive in clear text from the signup request, live only inside a
//! zeroising buffer, and leave the domain as a salted SHA-256 digest.

use std::fmt;

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::{UserValidationError, Username};

const SALT_LEN: usize = 16;

/// Validation errors for signup payload values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username failed validation.
    Username(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(err) => fmt::Display::fmt(err, f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated signup credentials.
///
/// ## Invariants
/// - `username` satisfies [`Username::new`].
/// - `password` is non-empty; whitespace is preserved as given.
///
/// # Examples
/// ```
/// use vacation_planner::domain::SignupCredentials;
///
/// let creds = SignupCredentials::try_from_parts(" maya ", "hunter2").unwrap();
/// assert_eq!(creds.username().as_ref(), "maya");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl SignupCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username).map_err(CredentialsValidationError::Username)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// The requested display name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Derive a salted digest of the secret with a fresh random salt.
    pub fn digest(&self) -> PasswordDigest {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        PasswordDigest::derive(&salt, self.password.as_str())
    }
}

/// Salted SHA-256 digest of a member secret, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    /// Hex-encoded salt.
    pub salt: String,
    /// Hex-encoded `sha256(salt || secret)`.
    pub hash: String,
}

impl PasswordDigest {
    fn derive(salt: &[u8], secret: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(secret.as_bytes());
        Self {
            salt: hex::encode(salt),
            hash: hex::encode(hasher.finalize()),
        }
    }

    /// Check a candidate secret against this digest.
    #[cfg(test)]
    pub(crate) fn matches(&self, secret: &str) -> bool {
        hex::decode(&self.salt)
            .map(|salt| Self::derive(&salt, secret).hash == self.hash)
            .unwrap_or(false)
    }
}
