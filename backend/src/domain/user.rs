//! Group member identity.
//!
//! A member carries two identifiers: the store-assigned [`UserId`] used for
//! joins, and the public [`UserCode`] handed out once at signup. Clients only
//! ever see and present the code.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PasswordDigest;

/// Maximum accepted username length, in characters.
pub const USERNAME_MAX: usize = 64;

/// Validation errors for member identity values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The user code is not a UUID.
    InvalidCode,
    /// Username was blank once trimmed.
    EmptyUsername,
    /// Username exceeds [`USERNAME_MAX`] characters.
    UsernameTooLong {
        /// Maximum number of characters.
        max: usize,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCode => write!(f, "user code must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Internal, store-assigned member identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap an identifier issued by the store.
    pub const fn from_raw(id: i64) -> Self {
        Self(id)
    }

    /// The raw identifier value.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque public handle returned at signup.
///
/// Codes are random v4 UUIDs; there is no recovery path if a member loses
/// theirs.
///
/// # Examples
/// ```
/// use vacation_planner::domain::UserCode;
///
/// let code = UserCode::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
/// assert_eq!(code.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert!(UserCode::parse("nope").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserCode(Uuid);

impl UserCode {
    /// Issue a new random code.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read back from the store.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a code presented by a client.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidCode)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique member display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and normalise a username; surrounding whitespace is dropped.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A registered group member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identity.
    pub id: UserId,
    /// Public handle.
    pub code: UserCode,
    /// Unique display name.
    pub username: Username,
}

/// A member about to be registered; the store assigns the [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Freshly issued public handle.
    pub code: UserCode,
    /// Requested display name.
    pub username: Username,
    /// Salted digest of the signup secret.
    pub digest: PasswordDigest,
}
