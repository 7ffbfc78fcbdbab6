//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use vacation_planner::domain::VacationCatalogue;
use vacation_planner::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) catalogue: VacationCatalogue,
    pub(crate) group_size: usize,
    pub(crate) user_quota: u32,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: PrometheusMetrics,
}

impl ServerConfig {
    /// Construct a configuration serving `catalogue` on `bind_addr`.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        catalogue: VacationCatalogue,
        #[cfg(feature = "metrics")] prometheus: PrometheusMetrics,
    ) -> Self {
        Self {
            bind_addr,
            catalogue,
            group_size: vacation_planner::domain::DEFAULT_GROUP_SIZE,
            user_quota: vacation_planner::domain::DEFAULT_USER_QUOTA,
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus,
        }
    }

    /// Override the group size and member quota.
    #[must_use]
    pub fn with_group(mut self, group_size: usize, user_quota: u32) -> Self {
        self.group_size = group_size;
        self.user_quota = user_quota;
        self
    }

    /// Attach a database connection pool for the Diesel repositories.
    ///
    /// Without a pool the server falls back to in-memory stores.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
