//! Member registration service.
//!
//! Implements [`UserSignup`] by issuing a fresh handle, digesting the secret,
//! and delegating the quota and uniqueness checks to one atomic repository
//! write.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{UserRepository, UserRepositoryError, UserSignup};
use crate::domain::{Error, NewUser, SignupCredentials, UserCode};

/// Default maximum number of registered members.
pub const DEFAULT_USER_QUOTA: u32 = 5;

/// Registration service bounded by a member quota.
#[derive(Clone)]
pub struct SignupService<U> {
    users: Arc<U>,
    quota: u32,
}

impl<U> SignupService<U> {
    /// Create a service admitting at most `quota` members.
    pub fn new(users: Arc<U>, quota: u32) -> Self {
        Self { users, quota }
    }
}

impl<U> SignupService<U>
where
    U: UserRepository,
{
    fn map_user_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::DuplicateUsername { .. } => {
                Error::conflict("Username already exists")
            }
            UserRepositoryError::QuotaReached { quota } => {
                Error::capacity_exceeded("The group is full; no more members can sign up")
                    .with_details(json!({ "quota": quota }))
            }
            other => Error::internal(format!("user repository error: {other}")),
        }
    }
}

#[async_trait]
impl<U> UserSignup for SignupService<U>
where
    U: UserRepository,
{
    async fn signup(&self, credentials: SignupCredentials) -> Result<UserCode, Error> {
        let new_user = NewUser {
            code: UserCode::generate(),
            username: credentials.username().clone(),
            digest: credentials.digest(),
        };
        let user = self
            .users
            .insert_within_quota(&new_user, self.quota)
            .await
            .map_err(Self::map_user_error)?;
        info!(user_id = %user.id, "member registered");
        Ok(user.code)
    }
}
