//! Port for vacation preference persistence.
//!
//! Each member owns at most one row. Inserts and updates are single
//! conditional writes: adapters report an existing row on insert, or a missing
//! row on update, from the write itself rather than a prior read.

use async_trait::async_trait;

use crate::domain::{PreferenceWithOwner, UserId, VacationPreference};

use super::define_port_error;

define_port_error! {
    /// Errors raised by preference repository adapters.
    pub enum PreferenceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "preference repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "preference repository query failed: {message}",
        /// The member already has a stored preference.
        AlreadySubmitted { user_id: i64 } =>
            "preferences already submitted for user {user_id}",
        /// The member has no stored preference to replace.
        NotSubmitted { user_id: i64 } =>
            "no preferences stored for user {user_id}",
    }
}

/// Port for preference storage and retrieval.
///
/// Listing operations return rows in submission order (ascending row id).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Fetch the preference owned by `user_id`.
    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<VacationPreference>, PreferenceRepositoryError>;

    /// Every stored preference with its owner's display name.
    async fn list_with_owner(&self) -> Result<Vec<PreferenceWithOwner>, PreferenceRepositoryError>;

    /// Insert a preference, failing with
    /// [`PreferenceRepositoryError::AlreadySubmitted`] when the owner has one.
    async fn insert(&self, preference: &VacationPreference)
    -> Result<(), PreferenceRepositoryError>;

    /// Replace the owner's preference, failing with
    /// [`PreferenceRepositoryError::NotSubmitted`] when there is none.
    async fn update(&self, preference: &VacationPreference)
    -> Result<(), PreferenceRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Reads are empty and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePreferenceRepository;

#[async_trait]
impl PreferenceRepository for FixturePreferenceRepository {
    async fn find_by_user(
        &self,
        _user_id: UserId,
    ) -> Result<Option<VacationPreference>, PreferenceRepositoryError> {
        Ok(None)
    }

    async fn list_with_owner(&self) -> Result<Vec<PreferenceWithOwner>, PreferenceRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(
        &self,
        _preference: &VacationPreference,
    ) -> Result<(), PreferenceRepositoryError> {
        Ok(())
    }

    async fn update(
        &self,
        _preference: &VacationPreference,
    ) -> Result<(), PreferenceRepositoryError> {
        Ok(())
    }
}
