//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly. Regenerate with `diesel print-schema` when they change.

diesel::table! {
    /// Registered group members.
    users (id) {
        /// Store-assigned primary key.
        id -> Int8,
        /// Public handle issued at signup; unique.
        user_code -> Uuid,
        /// Display name; unique, at most 64 characters.
        username -> Varchar,
        /// Hex-encoded salted SHA-256 digest of the signup secret.
        password_hash -> Text,
        /// Hex-encoded salt for `password_hash`.
        password_salt -> Text,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One vacation preference per member.
    preferences (id) {
        /// Store-assigned primary key; ascending in submission order.
        id -> Int8,
        /// Owning member; unique.
        user_id -> Int8,
        starting_date -> Date,
        end_date -> Date,
        desired_destination -> Text,
        vacation_type -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(preferences -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(preferences, users);
