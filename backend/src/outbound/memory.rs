//! In-memory repositories for development and tests.
//!
//! Both adapters share one [`MemoryStore`] so listings can join preferences
//! to their owners. Every operation holds the store lock for its whole
//! check-and-write, which gives the same atomicity as the database adapters.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    PreferenceRepository, PreferenceRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    NewUser, PasswordDigest, PreferenceWithOwner, User, UserCode, UserId, VacationPreference,
};

#[derive(Debug)]
struct StoredUser {
    user: User,
    #[expect(dead_code, reason = "kept to mirror the persisted users table")]
    digest: PasswordDigest,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_user_id: i64,
    next_preference_id: i64,
    users: Vec<StoredUser>,
    // Keyed by row id so iteration follows submission order.
    preferences: BTreeMap<i64, VacationPreference>,
}

/// Shared state behind the in-memory adapters.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A user repository over this store.
    pub fn users(&self) -> MemoryUserRepository {
        MemoryUserRepository {
            store: self.clone(),
        }
    }

    /// A preference repository over this store.
    pub fn preferences(&self) -> MemoryPreferenceRepository {
        MemoryPreferenceRepository {
            store: self.clone(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

/// In-memory implementation of the `UserRepository` port.
#[derive(Debug, Clone)]
pub struct MemoryUserRepository {
    store: MemoryStore,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_code(&self, code: &UserCode) -> Result<Option<User>, UserRepositoryError> {
        let state = self.store.lock().map_err(UserRepositoryError::query)?;
        Ok(state
            .users
            .iter()
            .find(|stored| stored.user.code == *code)
            .map(|stored| stored.user.clone()))
    }

    async fn insert_within_quota(
        &self,
        user: &NewUser,
        quota: u32,
    ) -> Result<User, UserRepositoryError> {
        let mut state = self.store.lock().map_err(UserRepositoryError::query)?;
        if state.users.len() >= quota as usize {
            return Err(UserRepositoryError::quota_reached(quota));
        }
        if state
            .users
            .iter()
            .any(|stored| stored.user.username == user.username)
        {
            return Err(UserRepositoryError::duplicate_username(
                user.username.as_ref(),
            ));
        }

        state.next_user_id += 1;
        let created = User {
            id: UserId::from_raw(state.next_user_id),
            code: user.code,
            username: user.username.clone(),
        };
        state.users.push(StoredUser {
            user: created.clone(),
            digest: user.digest.clone(),
        });
        Ok(created)
    }
}

/// In-memory implementation of the `PreferenceRepository` port.
#[derive(Debug, Clone)]
pub struct MemoryPreferenceRepository {
    store: MemoryStore,
}

#[async_trait]
impl PreferenceRepository for MemoryPreferenceRepository {
    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<VacationPreference>, PreferenceRepositoryError> {
        let state = self.store.lock().map_err(PreferenceRepositoryError::query)?;
        Ok(state
            .preferences
            .values()
            .find(|preference| preference.user_id == user_id)
            .cloned())
    }

    async fn list_with_owner(&self) -> Result<Vec<PreferenceWithOwner>, PreferenceRepositoryError> {
        let state = self.store.lock().map_err(PreferenceRepositoryError::query)?;
        state
            .preferences
            .iter()
            .map(|(id, preference)| {
                let owner = state
                    .users
                    .iter()
                    .find(|stored| stored.user.id == preference.user_id)
                    .ok_or_else(|| {
                        PreferenceRepositoryError::query(format!(
                            "preference {id} references unknown user {}",
                            preference.user_id
                        ))
                    })?;
                Ok(PreferenceWithOwner {
                    id: *id,
                    preference: preference.clone(),
                    username: owner.user.username.clone(),
                })
            })
            .collect()
    }

    async fn insert(
        &self,
        preference: &VacationPreference,
    ) -> Result<(), PreferenceRepositoryError> {
        let mut state = self.store.lock().map_err(PreferenceRepositoryError::query)?;
        if state
            .preferences
            .values()
            .any(|stored| stored.user_id == preference.user_id)
        {
            return Err(PreferenceRepositoryError::already_submitted(
                preference.user_id.as_i64(),
            ));
        }
        state.next_preference_id += 1;
        let id = state.next_preference_id;
        state.preferences.insert(id, preference.clone());
        Ok(())
    }

    async fn update(
        &self,
        preference: &VacationPreference,
    ) -> Result<(), PreferenceRepositoryError> {
        let mut state = self.store.lock().map_err(PreferenceRepositoryError::query)?;
        let stored = state
            .preferences
            .values_mut()
            .find(|stored| stored.user_id == preference.user_id)
            .ok_or_else(|| PreferenceRepositoryError::not_submitted(preference.user_id.as_i64()))?;
        *stored = preference.clone();
        Ok(())
    }
}
