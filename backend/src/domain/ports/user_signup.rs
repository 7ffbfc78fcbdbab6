//! Driving port for member registration.

use async_trait::async_trait;

use crate::domain::{Error, SignupCredentials, UserCode};

/// Domain use-case port for registering group members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSignup: Send + Sync {
    /// Register a member and return their newly issued handle.
    ///
    /// # Errors
    ///
    /// - `conflict` when the username is taken.
    /// - `capacity_exceeded` when the group is full.
    async fn signup(&self, credentials: SignupCredentials) -> Result<UserCode, Error>;
}

/// Fixture signup issuing a fresh handle for every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserSignup;

#[async_trait]
impl UserSignup for FixtureUserSignup {
    async fn signup(&self, _credentials: SignupCredentials) -> Result<UserCode, Error> {
        Ok(UserCode::generate())
    }
}
