//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{preferences, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub user_code: Uuid,
    pub username: String,
}

/// Insertable struct for registering a member.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub user_code: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub password_salt: &'a str,
}

/// Row struct for reading from the preferences table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PreferenceRow {
    pub id: i64,
    pub user_id: i64,
    pub starting_date: NaiveDate,
    pub end_date: NaiveDate,
    pub desired_destination: String,
    pub vacation_type: String,
}

/// Insertable struct for a member's first preference.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = preferences)]
pub(crate) struct NewPreferenceRow<'a> {
    pub user_id: i64,
    pub starting_date: NaiveDate,
    pub end_date: NaiveDate,
    pub desired_destination: &'a str,
    pub vacation_type: &'a str,
}

/// Changeset replacing a stored preference.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = preferences)]
pub(crate) struct PreferenceUpdate<'a> {
    pub starting_date: NaiveDate,
    pub end_date: NaiveDate,
    pub desired_destination: &'a str,
    pub vacation_type: &'a str,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
