//! Port abstraction for member persistence adapters and their errors.
//!
//! Registration is a single conditional write: adapters check the quota and
//! the username constraint inside the same atomic operation that inserts the
//! row, so concurrent signups can never overshoot the group size.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserCode, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another member already uses the display name.
        DuplicateUsername { username: String } => "username already taken: {username}",
        /// The group already holds `quota` members.
        QuotaReached { quota: u32 } => "user quota of {quota} reached",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a member by public handle.
    async fn find_by_code(&self, code: &UserCode) -> Result<Option<User>, UserRepositoryError>;

    /// Insert `user` if fewer than `quota` members exist and the username is
    /// free. The check and the insert happen atomically.
    async fn insert_within_quota(
        &self,
        user: &NewUser,
        quota: u32,
    ) -> Result<User, UserRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Lookups find nobody; inserts succeed with identifier `1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_code(&self, _code: &UserCode) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn insert_within_quota(
        &self,
        user: &NewUser,
        _quota: u32,
    ) -> Result<User, UserRepositoryError> {
        Ok(User {
            id: UserId::from_raw(1),
            code: user.code,
            username: user.username.clone(),
        })
    }
}
