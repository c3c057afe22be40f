//! Backend-neutral storage interface.
//!
//! The [`Store`] trait is what request handlers talk to. Two backends implement it:
//!
//! - [`postgres::PostgresStore`]: a connection pool over the repositories in [`crate::db::handlers`]
//! - [`file::JsonFileStore`]: one JSON document on local disk, for single-instance deployments
//!
//! [`open`] is the single point where configuration becomes a backend instance.

use std::{str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use tracing::info;

use crate::{
    config::DatabaseConfig,
    db::{
        errors::Result,
        models::{
            guests::{GuestCreateDBRequest, GuestEntry, GuestStatus, GuestSummary},
            live_location::{LiveLocation, LocationUpdateDBRequest},
            stats::Stats,
        },
    },
};

pub mod file;
pub mod postgres;

pub use file::JsonFileStore;
pub use postgres::PostgresStore;

/// Storage operations shared by every backend
#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;

    /// Create tables (or the data file) and seed the singleton rows. Safe to call repeatedly.
    async fn ensure_schema(&self) -> Result<()>;

    /// Every guestbook entry, newest first
    async fn list_guests(&self) -> Result<Vec<GuestEntry>>;

    /// Append one entry without touching the counters
    async fn insert_guest(&self, request: &GuestCreateDBRequest) -> Result<GuestEntry>;

    /// Add one to the counter matching `status`
    async fn increment_stat(&self, status: GuestStatus) -> Result<Stats>;

    /// Append one entry and bump its counter as a single unit. Either both happen or neither does.
    async fn record_rsvp(&self, request: &GuestCreateDBRequest) -> Result<GuestEntry>;

    /// Total entry count and the count of entries at or after `since`
    async fn guest_summary(&self, since: DateTime<Utc>) -> Result<GuestSummary>;

    async fn get_stats(&self) -> Result<Stats>;

    async fn get_location(&self) -> Result<LiveLocation>;

    /// Overwrite the live location, stamping it with the current time and `updated_by`
    async fn set_location(&self, request: &LocationUpdateDBRequest, updated_by: &str) -> Result<LiveLocation>;

    /// Release backend resources on shutdown
    async fn close(&self) {}
}

/// Build the configured backend and make sure its schema exists
pub async fn open(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn Store>> {
    let store: Arc<dyn Store> = match config {
        DatabaseConfig::Postgres { url, require_tls, pool } => {
            let mut options = PgConnectOptions::from_str(url).context("invalid database url")?;
            if *require_tls {
                options = options.ssl_mode(PgSslMode::Require);
            }

            let pool = PgPoolOptions::new()
                .max_connections(pool.max_connections)
                .min_connections(pool.min_connections)
                .acquire_timeout(Duration::from_secs(pool.acquire_timeout_secs))
                .idle_timeout(Some(Duration::from_secs(pool.idle_timeout_secs)))
                .max_lifetime(Some(Duration::from_secs(pool.max_lifetime_secs)))
                .connect_with(options)
                .await
                .context("failed to connect to postgres")?;

            Arc::new(PostgresStore::new(pool))
        }
        DatabaseConfig::File { path } => Arc::new(JsonFileStore::new(path)),
    };

    store.ensure_schema().await.context("failed to prepare storage")?;
    info!("Storage ready: {}", config.describe());

    Ok(store)
}
