//! Backend entry-point: loads settings and the catalogue, prepares the store,
//! and serves the planner API.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use vacation_planner::inbound::http::health::HealthState;
use vacation_planner::outbound::catalogue_file::load_catalogue;
use vacation_planner::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use vacation_planner::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let catalogue = load_catalogue(&settings.catalogue_dir()).map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(
        settings.bind_addr(),
        catalogue,
        #[cfg(feature = "metrics")]
        make_metrics()?,
    )
    .with_group(settings.group_size(), settings.user_quota());

    if let Some(database_url) = settings.database_url.as_deref() {
        if settings.run_migrations() {
            run_pending_migrations(database_url)
                .await
                .map_err(std::io::Error::other)?;
        }
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    info!(
        bind_addr = %settings.bind_addr(),
        group_size = settings.group_size(),
        user_quota = settings.user_quota(),
        "starting vacation planner"
    );
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("vacation_planner")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("configure Prometheus metrics: {e}")))
}
