//! Shared startup for the cinepoll binaries.

use std::sync::Arc;

use anyhow::Context;
use cinepoll_common::Config;
use sea_orm::DatabaseConnection;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "cinepoll=debug,tower_http=debug";

/// Install the global tracing subscriber.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .init();
}

/// Connect to the configured database and bring the schema up to date.
pub async fn connect_database(config: &Config) -> anyhow::Result<Arc<DatabaseConnection>> {
    let db = cinepoll_db::init(config)
        .await
        .context("failed to connect to database")?;

    info!("Running database migrations...");
    cinepoll_db::migrate(&db)
        .await
        .context("failed to run migrations")?;

    Ok(Arc::new(db))
}
