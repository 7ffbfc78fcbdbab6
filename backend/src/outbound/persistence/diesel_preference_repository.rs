//! PostgreSQL-backed `PreferenceRepository` implementation using Diesel ORM.
//!
//! Inserts use `ON CONFLICT (user_id) DO NOTHING` and updates filter on
//! `user_id`; in both cases the affected row count decides the outcome, so no
//! read precedes a write.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PreferenceRepository, PreferenceRepositoryError};
use crate::domain::{
    Destination, PreferenceWithOwner, TravelWindow, UserId, Username, VacationPreference,
    VacationType,
};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, map_basic_pool_error};
use super::models::{NewPreferenceRow, PreferenceRow, PreferenceUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{preferences, users};

/// Diesel-backed implementation of the `PreferenceRepository` port.
#[derive(Clone)]
pub struct DieselPreferenceRepository {
    pool: DbPool,
}

impl DieselPreferenceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PreferenceRepositoryError {
    map_basic_pool_error(error, PreferenceRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PreferenceRepositoryError {
    match classify_diesel_error(&error) {
        DieselFailure::Connection(message) => PreferenceRepositoryError::connection(message),
        DieselFailure::Query(message) => PreferenceRepositoryError::query(message),
        DieselFailure::UniqueViolation(_) => PreferenceRepositoryError::query("database error"),
    }
}

fn row_to_preference(row: PreferenceRow) -> VacationPreference {
    VacationPreference {
        user_id: UserId::from_raw(row.user_id),
        window: TravelWindow::from_stored(row.starting_date, row.end_date),
        destination: Destination::from_stored(row.desired_destination),
        vacation_type: VacationType::from_stored(row.vacation_type),
    }
}

fn row_to_listing(
    (row, username): (PreferenceRow, String),
) -> Result<PreferenceWithOwner, PreferenceRepositoryError> {
    let username = Username::new(&username).map_err(|err| {
        PreferenceRepositoryError::query(format!(
            "stored username for user {} is invalid: {err}",
            row.user_id
        ))
    })?;
    Ok(PreferenceWithOwner {
        id: row.id,
        preference: row_to_preference(row),
        username,
    })
}

#[async_trait]
impl PreferenceRepository for DieselPreferenceRepository {
    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<VacationPreference>, PreferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PreferenceRow> = preferences::table
            .filter(preferences::user_id.eq(user_id.as_i64()))
            .select(PreferenceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_preference))
    }

    async fn list_with_owner(&self) -> Result<Vec<PreferenceWithOwner>, PreferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(PreferenceRow, String)> = preferences::table
            .inner_join(users::table)
            .order(preferences::id.asc())
            .select((PreferenceRow::as_select(), users::username))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_listing).collect()
    }

    async fn insert(
        &self,
        preference: &VacationPreference,
    ) -> Result<(), PreferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewPreferenceRow {
            user_id: preference.user_id.as_i64(),
            starting_date: preference.window.starting_date(),
            end_date: preference.window.end_date(),
            desired_destination: preference.destination.as_ref(),
            vacation_type: preference.vacation_type.as_ref(),
        };

        let inserted = diesel::insert_into(preferences::table)
            .values(&new_row)
            .on_conflict(preferences::user_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if inserted == 0 {
            return Err(PreferenceRepositoryError::already_submitted(
                preference.user_id.as_i64(),
            ));
        }
        Ok(())
    }

    async fn update(
        &self,
        preference: &VacationPreference,
    ) -> Result<(), PreferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = PreferenceUpdate {
            starting_date: preference.window.starting_date(),
            end_date: preference.window.end_date(),
            desired_destination: preference.destination.as_ref(),
            vacation_type: preference.vacation_type.as_ref(),
            updated_at: Utc::now(),
        };

        let updated = diesel::update(
            preferences::table.filter(preferences::user_id.eq(preference.user_id.as_i64())),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(PreferenceRepositoryError::not_submitted(
                preference.user_id.as_i64(),
            ));
        }
        Ok(())
    }
}
