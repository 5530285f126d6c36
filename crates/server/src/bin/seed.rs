//! Populate the movie table from TMDB.

use std::sync::Arc;

use anyhow::Context;
use cinepoll_common::Config;
use cinepoll_core::{MovieService, SeedingService, TmdbClient};
use cinepoll_db::repositories::{ChoiceRepository, MovieRepository};
use cinepoll_server::{connect_database, init_tracing};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::load().context("failed to load configuration")?;
    let client = TmdbClient::from_config(&config.seed)?;
    let db = connect_database(&config).await?;

    let movie_service = MovieService::new(
        MovieRepository::new(Arc::clone(&db)),
        ChoiceRepository::new(db),
    );
    let seeding = SeedingService::new(Arc::new(client), movie_service, &config.seed);

    info!(pages = config.seed.pages, "Seeding movies from TMDB...");
    let report = seeding.seed(config.seed.pages).await?;
    if report.created == 0 {
        info!("No movies were stored");
    }

    Ok(())
}
