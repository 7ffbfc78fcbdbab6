//! Application settings loaded via OrthoConfig.
//!
//! Values come from `VACATION_*` environment variables, CLI flags, or a
//! configuration file, in OrthoConfig's usual precedence.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_GROUP_SIZE, DEFAULT_USER_QUOTA};

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8080);

fn default_catalogue_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("catalogue")
}

/// Server start-up configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "VACATION")]
pub struct AppSettings {
    /// PostgreSQL connection string; in-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// Directory holding `destinations.json` and `vacation_types.json`.
    pub catalogue_dir: Option<PathBuf>,
    /// Number of submissions required before a plan can be computed.
    pub group_size: Option<usize>,
    /// Maximum number of members that may sign up.
    pub user_quota: Option<u32>,
    /// Apply embedded migrations before serving.
    pub run_migrations: Option<bool>,
}

impl AppSettings {
    /// Configured listen address, or `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured catalogue directory, or the bundled fixtures.
    pub fn catalogue_dir(&self) -> PathBuf {
        self.catalogue_dir
            .clone()
            .unwrap_or_else(default_catalogue_dir)
    }

    /// Configured group size, or [`DEFAULT_GROUP_SIZE`].
    pub fn group_size(&self) -> usize {
        self.group_size.unwrap_or(DEFAULT_GROUP_SIZE)
    }

    /// Configured member quota, or [`DEFAULT_USER_QUOTA`].
    pub fn user_quota(&self) -> u32 {
        self.user_quota.unwrap_or(DEFAULT_USER_QUOTA)
    }

    /// Whether to apply embedded migrations at start-up; on unless disabled.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}
