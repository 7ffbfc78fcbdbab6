//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod preference_command;
mod preference_query;
mod preference_repository;
mod user_repository;
mod user_signup;

#[cfg(test)]
pub use preference_command::MockPreferenceCommand;
pub use preference_command::{
    FixturePreferenceCommand, PreferenceCommand, SubmitPreferenceRequest,
};
#[cfg(test)]
pub use preference_query::MockPreferenceQuery;
pub use preference_query::{FixturePreferenceQuery, PreferenceQuery, VacationOptions};
#[cfg(test)]
pub use preference_repository::MockPreferenceRepository;
pub use preference_repository::{
    FixturePreferenceRepository, PreferenceRepository, PreferenceRepositoryError,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
#[cfg(test)]
pub use user_signup::MockUserSignup;
pub use user_signup::{FixtureUserSignup, UserSignup};
