//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixturePreferenceCommand, FixturePreferenceQuery, FixtureUserSignup, PreferenceCommand,
    PreferenceQuery, UserSignup,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Preference submission use-cases.
    pub preferences: Arc<dyn PreferenceCommand>,
    /// Preference reads and the group plan.
    pub preferences_query: Arc<dyn PreferenceQuery>,
    /// Member registration.
    pub signup: Arc<dyn UserSignup>,
}

impl HttpState {
    /// Bundle the given port implementations.
    pub fn new(
        preferences: Arc<dyn PreferenceCommand>,
        preferences_query: Arc<dyn PreferenceQuery>,
        signup: Arc<dyn UserSignup>,
    ) -> Self {
        Self {
            preferences,
            preferences_query,
            signup,
        }
    }
}

impl Default for HttpState {
    /// State backed by fixture ports; useful for handler tests.
    fn default() -> Self {
        Self::new(
            Arc::new(FixturePreferenceCommand),
            Arc::new(FixturePreferenceQuery),
            Arc::new(FixtureUserSignup),
        )
    }
}
