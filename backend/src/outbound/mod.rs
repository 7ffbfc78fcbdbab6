//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-memory repositories for development and tests
//! - **catalogue_file**: start-up loader for the vacation option sets
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod catalogue_file;
pub mod memory;
pub mod persistence;
