//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed group-planning entities used by the API and
//! persistence layers, plus the pure consensus reduction over them. Types are
//! immutable once validated; constructors document their invariants.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserCode, Username: member identity.
//! - VacationCatalogue, Destination, VacationType: configured option sets.
//! - TravelWindow, VacationPreference: submitted preferences.
//! - ConsensusEngine, ConsensusResult: the group plan.

pub mod catalogue;
pub mod consensus;
pub mod credentials;
pub mod error;
pub mod ports;
pub mod preferences;
pub mod preferences_service;
pub mod signup_service;
pub mod trace_id;
pub mod user;

pub use self::catalogue::{CatalogueError, Destination, VacationCatalogue, VacationType};
pub use self::consensus::{
    ConsensusEngine, ConsensusError, ConsensusResult, DEFAULT_GROUP_SIZE, plurality,
};
pub use self::credentials::{CredentialsValidationError, PasswordDigest, SignupCredentials};
pub use self::error::{Error, ErrorCode};
pub use self::preferences::{
    MAX_SPAN_DAYS, PreferenceWithOwner, TravelWindow, TravelWindowError, VacationPreference,
    span_in_days,
};
pub use self::preferences_service::PreferenceService;
pub use self::signup_service::{DEFAULT_USER_QUOTA, SignupService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, USERNAME_MAX, User, UserCode, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use vacation_planner::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
