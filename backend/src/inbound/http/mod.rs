//! HTTP inbound adapter exposing REST endpoints.
//!
//! Signup and preference routes are mounted under `/api`; health probes sit at
//! the root.

pub mod error;
pub mod health;
pub mod preferences;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;
