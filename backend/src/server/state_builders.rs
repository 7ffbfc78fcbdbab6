//! Builders wiring domain services over the configured stores.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use vacation_planner::domain::ports::{PreferenceRepository, UserRepository};
use vacation_planner::domain::{
    ConsensusEngine, PreferenceService, SignupService, VacationCatalogue,
};
use vacation_planner::inbound::http::state::HttpState;
use vacation_planner::outbound::memory::MemoryStore;
use vacation_planner::outbound::persistence::{DieselPreferenceRepository, DieselUserRepository};

use super::ServerConfig;

fn build_services<U, P>(
    users: Arc<U>,
    preferences: Arc<P>,
    catalogue: VacationCatalogue,
    config: &ServerConfig,
) -> HttpState
where
    U: UserRepository + 'static,
    P: PreferenceRepository + 'static,
{
    let preference_service = Arc::new(PreferenceService::new(
        users.clone(),
        preferences,
        Arc::new(catalogue),
        ConsensusEngine::new(config.group_size),
    ));
    HttpState::new(
        preference_service.clone(),
        preference_service,
        Arc::new(SignupService::new(users, config.user_quota)),
    )
}

/// Build the handler state, preferring Diesel repositories when a pool is
/// configured and in-memory stores otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let catalogue = config.catalogue.clone();
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL-backed repositories");
            build_services(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselPreferenceRepository::new(pool.clone())),
                catalogue,
                config,
            )
        }
        None => {
            warn!("no database configured; members and preferences are kept in memory only");
            let store = MemoryStore::new();
            build_services(
                Arc::new(store.users()),
                Arc::new(store.preferences()),
                catalogue,
                config,
            )
        }
    };
    web::Data::new(state)
}
