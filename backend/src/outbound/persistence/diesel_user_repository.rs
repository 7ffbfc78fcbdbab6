//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Registration runs in one transaction that takes a `SHARE ROW EXCLUSIVE`
//! lock on `users`, counts the members, and inserts only when the quota still
//! has room. The lock serialises concurrent signups; the unique index on
//! `username` turns a taken name into a constraint violation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, User, UserCode, UserId, Username};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error, username: &Username) -> UserRepositoryError {
    match classify_diesel_error(&error) {
        DieselFailure::UniqueViolation(Some(constraint)) if constraint.contains("user_code") => {
            UserRepositoryError::query("user code collision")
        }
        DieselFailure::UniqueViolation(_) => {
            UserRepositoryError::duplicate_username(username.as_ref())
        }
        DieselFailure::Connection(message) => UserRepositoryError::connection(message),
        DieselFailure::Query(message) => UserRepositoryError::query(message),
    }
}

fn map_read_error(error: diesel::result::Error) -> UserRepositoryError {
    match classify_diesel_error(&error) {
        DieselFailure::Connection(message) => UserRepositoryError::connection(message),
        DieselFailure::Query(message) => UserRepositoryError::query(message),
        DieselFailure::UniqueViolation(_) => UserRepositoryError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let username = Username::new(&row.username).map_err(|err| {
        UserRepositoryError::query(format!("stored username for user {} is invalid: {err}", row.id))
    })?;
    Ok(User {
        id: UserId::from_raw(row.id),
        code: UserCode::from_uuid(row.user_code),
        username,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_code(&self, code: &UserCode) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::user_code.eq(code.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_user).transpose()
    }

    async fn insert_within_quota(
        &self,
        user: &NewUser,
        quota: u32,
    ) -> Result<User, UserRepositoryError> {
        let new_row = NewUserRow {
            user_code: *user.code.as_uuid(),
            username: user.username.as_ref(),
            password_hash: user.digest.hash.as_str(),
            password_salt: user.digest.salt.as_str(),
        };
        let limit = i64::from(quota);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let inserted = conn
            .transaction(|conn| {
                async move {
                    diesel::sql_query("LOCK TABLE users IN SHARE ROW EXCLUSIVE MODE")
                        .execute(conn)
                        .await?;

                    let registered: i64 = users::table.count().get_result(conn).await?;
                    if registered >= limit {
                        return Ok(None);
                    }

                    let row = diesel::insert_into(users::table)
                        .values(&new_row)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(Some(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, &user.username))?;

        match inserted {
            Some(row) => row_to_user(row),
            None => Err(UserRepositoryError::quota_reached(quota)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    fn maya() -> Username {
        Username::new("maya").expect("valid name")
    }

    #[rstest]
    fn username_violation_maps_to_duplicate() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );
        assert_eq!(
            map_diesel_error(error, &maya()),
            UserRepositoryError::duplicate_username("maya")
        );
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("gone".to_owned()),
        );
        assert!(matches!(
            map_diesel_error(error, &maya()),
            UserRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn pool_checkout_maps_to_connection_error() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            UserRepositoryError::connection("timed out")
        );
    }

    #[rstest]
    fn rows_convert_to_domain_users() {
        let code = Uuid::new_v4();
        let user = row_to_user(UserRow {
            id: 3,
            user_code: code,
            username: "maya".to_owned(),
        })
        .expect("valid row");
        assert_eq!(user.id, UserId::from_raw(3));
        assert_eq!(user.code, UserCode::from_uuid(code));
    }

    #[rstest]
    fn blank_stored_usernames_are_query_errors() {
        let result = row_to_user(UserRow {
            id: 3,
            user_code: Uuid::new_v4(),
            username: "   ".to_owned(),
        });
        assert!(matches!(result, Err(UserRepositoryError::Query { .. })));
    }
}
