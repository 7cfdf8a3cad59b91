//! # Service configuration
//!
//! The service is configured entirely through environment variables. A `.env` file in the working directory is
//! loaded first, if there is one.
//!
//! | Variable                | Default                            |                                                     |
//! |-------------------------|------------------------------------|-----------------------------------------------------|
//! | `VMS_DATABASE_URL`      | `sqlite://data/vendor_metrics.db`  | The SQLite database holding vendors and orders      |
//! | `VMS_MAX_CONNECTIONS`   | 25                                 | Size of the database connection pool                |
//! | `VMS_SNAPSHOT_SCHEDULE` | `sun 00:00`                        | When the weekly snapshot runs, in UTC               |
//! | `VMS_RUN_MIGRATIONS`    | `true`                             | Bring the schema up to date at startup              |
//!
//! Invalid values are logged and replaced by the default.
use std::env;

use log::*;

use crate::schedule::WeeklySchedule;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/vendor_metrics.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 25;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub snapshot_schedule: WeeklySchedule,
    /// If false, the schema must already be up to date
    pub run_migrations: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            snapshot_schedule: WeeklySchedule::default(),
            run_migrations: true,
        }
    }
}

impl ServiceConfig {
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source. `lookup` returns `None` for unset variables.
    pub fn from_lookup<F>(lookup: F) -> Self
    where F: Fn(&str) -> Option<String> {
        let database_url = lookup("VMS_DATABASE_URL").unwrap_or_else(|| {
            info!("🪛️ VMS_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let max_connections = lookup("VMS_MAX_CONNECTIONS")
            .and_then(|s| match s.parse::<u32>() {
                Ok(0) => {
                    warn!("🪛️ VMS_MAX_CONNECTIONS must be at least 1. Using the default, {DEFAULT_MAX_CONNECTIONS}.");
                    None
                },
                Ok(n) => Some(n),
                Err(e) => {
                    error!(
                        "🪛️ {s} is not a valid value for VMS_MAX_CONNECTIONS. {e} Using the default, \
                         {DEFAULT_MAX_CONNECTIONS}, instead."
                    );
                    None
                },
            })
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let snapshot_schedule = lookup("VMS_SNAPSHOT_SCHEDULE")
            .and_then(|s| {
                s.parse::<WeeklySchedule>()
                    .map_err(|e| error!("🪛️ {e} Using the default schedule, {}.", WeeklySchedule::default()))
                    .ok()
            })
            .unwrap_or_default();
        let run_migrations = lookup("VMS_RUN_MIGRATIONS").map(|s| &s != "0" && &s != "false").unwrap_or(true);
        Self { database_url, max_connections, snapshot_schedule, run_migrations }
    }
}
